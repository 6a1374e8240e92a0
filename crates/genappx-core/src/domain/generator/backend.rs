//! Express server and FastAPI app.

use super::{Flags, Scaffold, frontend};
use crate::domain::env;
use crate::domain::generator::packages::python_packages_for;
use crate::domain::value_objects::Category;

/// Path of the FastAPI entry module, relative to the project root.
pub(super) const MAIN_PY: &str = "api/main.py";

/// Retriever stub endpoint, replaced by the vector-backed one when available.
pub(super) const RAG_STUB: &str = "@app.post('/rag')\n\
async def rag(q: Ask, retriever = Depends(get_retriever)):\n    \
docs = retriever(q.question)\n    \
return {'chunks': docs}\n";

pub(super) const RAG_STUB_IMPORT: &str = "from .rag import get_retriever\n";

pub(super) fn emit(s: &mut Scaffold<'_, '_>) {
    if s.flags.express {
        express(s);
    }
    if s.flags.fastapi {
        fastapi(s);
    }
}

/// Express gets a chat route when React can call it and a model is selected.
fn wants_chat_route(flags: &Flags) -> bool {
    flags.express && flags.react && flags.any_provider
}

fn express(s: &mut Scaffold<'_, '_>) {
    let chat = wants_chat_route(&s.flags);
    let (import, mount) = if chat {
        (
            "import chatRouter from './routes/chat.js';\n",
            "app.use('/api', chatRouter);\n",
        )
    } else {
        ("", "")
    };
    let server_js = format!(
        "import express from 'express';\n\
         import cors from 'cors';\n\
         import helmet from 'helmet';\n\
         {import}\
         const app = express();\n\
         app.use(helmet());\n\
         app.use(cors());\n\
         app.use(express.json());\n\
         app.get('/api/health', (_req, res) => res.json({{ ok: true }}));\n\
         {mount}\
         const port = process.env.PORT || 3001;\n\
         app.listen(port, () => console.log('Express server running on ' + port));\n"
    );
    s.sources.put_file("server/server.js", server_js);
    if chat {
        let route = chat_route(s);
        s.sources.put_file("server/routes/chat.js", route);
    }
}

/// `POST /api/chat`, trying each selected provider in turn before echoing.
fn chat_route(s: &Scaffold<'_, '_>) -> String {
    let mut setup = String::new();
    let mut branches = String::new();

    if s.has(Category::LlmProviders, "openai") {
        let key = env::var(Category::LlmProviders, "openai", 0);
        setup.push_str(&format!(
            "let openaiClient = null;\n\
             if (process.env.{key}) {{\n  \
             try {{\n    \
             const OpenAI = (await import('openai')).default;\n    \
             openaiClient = new OpenAI({{ apiKey: process.env.{key} }});\n  \
             }} catch (_) {{}}\n\
             }}\n"
        ));
        branches.push_str(
            "    if (openaiClient) {\n      \
             const completion = await openaiClient.chat.completions.create({ model: 'gpt-4o-mini', messages: [{ role: 'user', content: message }] });\n      \
             return res.json({ reply: completion.choices[0].message.content });\n    \
             }\n",
        );
    }
    if s.has(Category::LlmProviders, "anthropic") {
        let key = env::var(Category::LlmProviders, "anthropic", 0);
        branches.push_str(&format!(
            "    if (process.env.{key}) {{\n      \
             const r = await fetch('https://api.anthropic.com/v1/messages', {{\n        \
             method: 'POST',\n        \
             headers: {{ 'Content-Type': 'application/json', 'x-api-key': process.env.{key}, 'anthropic-version': '2023-06-01' }},\n        \
             body: JSON.stringify({{ model: 'claude-3-5-sonnet-latest', max_tokens: 512, messages: [{{ role: 'user', content: message }}] }}),\n      \
             }});\n      \
             const j = await r.json();\n      \
             return res.json({{ reply: (j.content && j.content[0] && j.content[0].text) || '' }});\n    \
             }}\n"
        ));
    }
    if s.has(Category::LlmProviders, "ollama") {
        let key = env::var(Category::LlmProviders, "ollama", 0);
        setup.push_str(&format!(
            "function ollamaBase() {{\n  \
             const host = process.env.{key} || 'localhost';\n  \
             const withScheme = host.startsWith('http') ? host : 'http://' + host;\n  \
             return /:\\d+$/.test(withScheme) ? withScheme : withScheme + ':11434';\n\
             }}\n"
        ));
        branches.push_str(&format!(
            "    if (process.env.{key}) {{\n      \
             const r = await fetch(ollamaBase() + '/api/generate', {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify({{ model: 'llama3', prompt: message, stream: false }}) }});\n      \
             const j = await r.json();\n      \
             return res.json({{ reply: (j.response || '').trim() }});\n    \
             }}\n"
        ));
    }

    format!(
        "import {{ Router }} from 'express';\n\n\
         const router = Router();\n\
         {setup}\n\
         router.post('/chat', async (req, res) => {{\n  \
         const {{ message }} = req.body || {{}};\n  \
         if (!message) {{\n    \
         return res.status(400).json({{ error: 'message required' }});\n  \
         }}\n  \
         try {{\n\
         {branches}    \
         return res.json({{ reply: 'Echo: ' + message }});\n  \
         }} catch (err) {{\n    \
         console.error(err);\n    \
         return res.status(500).json({{ error: err.message }});\n  \
         }}\n\
         }});\n\n\
         export default router;\n"
    )
}

fn fastapi(s: &mut Scaffold<'_, '_>) {
    let mut main = String::from(
        "from fastapi import FastAPI, Depends\n\
         from pydantic import BaseModel\n\
         import os\n\n\
         app = FastAPI()\n\n\
         class Echo(BaseModel):\n    \
         message: str\n\n\
         class Ask(BaseModel):\n    \
         question: str\n\n\
         @app.get('/health')\n\
         async def health():\n    \
         return {'ok': True}\n\n\
         @app.post('/echo')\n\
         async def echo(payload: Echo):\n    \
         return {'echo': payload.message}\n",
    );

    if s.flags.want_rag {
        main.push('\n');
        main.push_str(RAG_STUB_IMPORT);
        main.push('\n');
        main.push_str(RAG_STUB);
        s.sources.put_file("api/rag.py", RAG_PY);
        s.python.insert("pydantic".to_string());
    }

    // Chat UI talks to FastAPI only when there is no Express server.
    if frontend::wants_chat_ui(&s.flags) && !s.flags.express {
        main.push_str(&fastapi_chat(s));
    }

    s.sources.put_file("api/__init__.py", "");
    s.sources.put_file(MAIN_PY, main);
    for pkg in python_packages_for(Category::Backend, "fastapi") {
        s.python.insert((*pkg).to_string());
    }
}

fn fastapi_chat(s: &mut Scaffold<'_, '_>) -> String {
    let head = "\n# Chat\nclass ChatIn(BaseModel):\n    message: str\n\n";
    if s.flags.openai {
        s.python.insert("openai".to_string());
        let key = env::var(Category::LlmProviders, "openai", 0);
        format!(
            "{head}@app.post('/api/chat')\n\
             async def chat(payload: ChatIn):\n    \
             if os.getenv('{key}'):\n        \
             from openai import OpenAI\n        \
             client = OpenAI(api_key=os.getenv('{key}'))\n        \
             resp = client.chat.completions.create(model='gpt-4o-mini', messages=[{{'role': 'user', 'content': payload.message}}])\n        \
             return {{'reply': resp.choices[0].message.content}}\n    \
             return {{'reply': 'Echo: ' + payload.message}}\n"
        )
    } else {
        format!(
            "{head}@app.post('/api/chat')\n\
             async def chat(payload: ChatIn):\n    \
             return {{'reply': 'Echo: ' + payload.message}}\n"
        )
    }
}

const RAG_PY: &str = r#"# Minimal placeholder retriever for the RAG demo
from typing import Callable, List

CORPUS = [
    'GenAppXpress accelerates scaffolding.',
    'LangChain enables composable LLM workflows.',
    'FastAPI delivers high-performance async APIs.',
]


def simple_retriever(query: str) -> List[str]:
    q = query.lower().split()
    return [c for c in CORPUS if any(tok in c.lower() for tok in q)][:3]


def get_retriever() -> Callable[[str], List[str]]:
    return simple_retriever
"#;
