//! Template enhancements.
//!
//! Each active template contributes files, endpoints appended to
//! `api/main.py`, python packages and a README section. Endpoint blocks are
//! appended behind a marker so that a second pass finds them already there.
//! Templates with a retrieval story take the vector path when a vector
//! database and OpenAI (for embeddings) are both selected, and fall back to a
//! dependency-free keyword version otherwise.

use super::backend::{MAIN_PY, RAG_STUB, RAG_STUB_IMPORT};
use super::database::client_module;
use super::{Scaffold, VECTOR_DATABASES};
use crate::domain::env;
use crate::domain::value_objects::Category;

type Enhancement = fn(&mut Scaffold<'_, '_>);

/// Template id → enhancement, in application order.
static ENHANCEMENTS: &[(&str, Enhancement)] = &[
    ("ai-chatbot", ai_chatbot),
    ("rag-service", rag_service),
    ("local-first", local_first),
    ("web-research", web_research),
    ("process-automator", process_automator),
    ("code-assistant-mcp", code_assistant_mcp),
    ("multimodal-assistant", multimodal_assistant),
    ("knowledge-base", knowledge_base),
    ("pdf-chat", pdf_chat),
    ("vector-ingest", vector_ingest),
];

const OPENAI_KEY_SLOT: &str = "{openai_key}";

pub(super) fn apply(s: &mut Scaffold<'_, '_>) {
    for (id, enhance) in ENHANCEMENTS {
        if s.selection.has_template(id) {
            enhance(s);
        }
    }
}

fn openai_key() -> &'static str {
    env::var(Category::LlmProviders, "openai", 0)
}

fn with_openai_key(template: &str) -> String {
    template.replace(OPENAI_KEY_SLOT, openai_key())
}

fn add_python(s: &mut Scaffold<'_, '_>, packages: &[&str]) {
    for pkg in packages {
        s.python.insert((*pkg).to_string());
    }
}

/// Append an endpoint block to `api/main.py` unless its marker is present.
fn append_endpoints(s: &mut Scaffold<'_, '_>, marker: &str, block: &str) {
    let text = format!("\n{marker}\n{block}");
    s.sources.append_once(MAIN_PY, marker, &text);
}

fn ai_chatbot(s: &mut Scaffold<'_, '_>) {
    if s.flags.react {
        s.sources.put_file(
            "src/chatApi.js",
            "export async function sendChat(message) {\n  \
             const r = await fetch('/api/chat', { method: 'POST', headers: { 'Content-Type': 'application/json' }, body: JSON.stringify({ message }) });\n  \
             return r.json();\n\
             }\n",
        );
    }
    let requirement = if s.flags.openai { " Requires OPENAI_API_KEY in .env." } else { "" };
    s.readme_section(
        "## AI Chatbot",
        &format!("Start backend (Express) then frontend. Use the chat box to converse with the selected model.{requirement}\n"),
    );
}

/// `api/vector_store.py` for the first selected vector database.
fn ensure_vector_store(s: &mut Scaffold<'_, '_>) {
    let Some(db) = s.flags.vector_db else {
        return;
    };
    if s.sources.contains("api/vector_store.py") {
        return;
    }
    let (imports, body) = match db {
        "pinecone" => (PINECONE_IMPORTS, PINECONE_STORE),
        "chroma" => (CHROMA_IMPORTS, CHROMA_STORE),
        "weaviate" => (WEAVIATE_IMPORTS, WEAVIATE_STORE),
        _ => (QDRANT_IMPORTS, QDRANT_STORE),
    };
    let imports = imports.replace("{client_module}", &client_module(db));
    let content = with_openai_key(VECTOR_STORE)
        .replace("{db}", db)
        .replace("{db_imports}", &imports)
        .replace("{store}", body);
    s.sources.put_file("api/vector_store.py", content);
    add_python(s, &["openai"]);
}

fn rag_service(s: &mut Scaffold<'_, '_>) {
    if !s.flags.fastapi {
        return;
    }

    if s.flags.full_vector_path() {
        ensure_vector_store(s);
        s.sources.put_file("api/ingest.py", VECTOR_INGEST_PY);
        let replaced = s
            .sources
            .replace_in(MAIN_PY, RAG_STUB_IMPORT, "from .vector_store import get_vector_store\n");
        if replaced {
            s.sources.replace_in(MAIN_PY, RAG_STUB, VECTOR_RAG_ENDPOINT);
        } else if !has_rag_route(s) {
            append_endpoints(
                s,
                "# RAG endpoints",
                &format!("from .vector_store import get_vector_store\n\n{VECTOR_RAG_ENDPOINT}"),
            );
        }
    } else {
        s.sources.put_file("api/embeddings.py", SIMPLE_EMBEDDINGS_PY);
        s.sources.put_file("api/ingest.py", SIMPLE_INGEST_PY);
        if !has_rag_route(s) {
            append_endpoints(s, "# RAG endpoints", SIMPLE_RAG_ENDPOINT);
        }
    }

    let vector_dbs: Vec<&str> = s
        .selection
        .ids(Category::Database)
        .filter(|id| VECTOR_DATABASES.contains(id))
        .collect();
    let vector_note = if vector_dbs.is_empty() {
        String::new()
    } else {
        format!(
            "\n## Vector Database\nThis project uses {} for vector storage.\nMake sure to set the required API keys in .env file.\n",
            vector_dbs.join(" + ")
        )
    };
    s.readme_section(
        "## RAG Service",
        &format!(
            "Run:\n1. source .venv/bin/activate\n2. python -m api.ingest\n3. uvicorn api.main:app --reload\n\
             POST /rag {{\"question\": \"Your query\"}}{vector_note}\n"
        ),
    );
}

fn has_rag_route(s: &Scaffold<'_, '_>) -> bool {
    s.sources
        .file(MAIN_PY)
        .is_some_and(|main| main.contains("@app.post('/rag')"))
}

fn local_first(s: &mut Scaffold<'_, '_>) {
    if !s.flags.express {
        return;
    }
    s.readme_section(
        "## Local-first",
        "Starts with Ollama. Ensure 'ollama run llama3' has been executed and OLLAMA_HOST is set if remote.\n",
    );
}

fn web_research(s: &mut Scaffold<'_, '_>) {
    let crew = s.has(Category::AiFrameworks, "crewai");
    let (imports, tail) = if crew { (WEB_RESEARCH_CREW_IMPORTS, WEB_RESEARCH_CREW) } else { ("", "") };
    s.sources.put_file(
        "agents/web_research.py",
        WEB_RESEARCH_PY
            .replace("{crew_imports}", imports)
            .replace("{crew}", tail),
    );
    add_python(s, &["beautifulsoup4", "requests"]);
    s.readme_section(
        "## Web Research",
        "Run: source .venv/bin/activate && python agents/web_research.py\n\
         Outputs collected titles (placeholder). Extend with real scraping & tool sets.\n",
    );
}

fn process_automator(s: &mut Scaffold<'_, '_>) {
    if !s.has(Category::AiFrameworks, "crewai") {
        return;
    }
    s.sources.put_file("agents/process_automator.py", PROCESS_AUTOMATOR_PY);
    s.readme_section(
        "## Process Automator",
        "Run: source .venv/bin/activate && python agents/process_automator.py\n\
         Demonstrates planner -> executor -> reviewer pattern.\n",
    );
}

fn code_assistant_mcp(s: &mut Scaffold<'_, '_>) {
    if !s.has(Category::Protocols, "mcp") {
        return;
    }
    s.sources.put_file("agents/mcp/client.js", MCP_CLIENT_JS);
    s.sources.put_file("agents/mcp/tools/fsTool.js", MCP_FS_TOOL_JS);
    s.readme_section(
        "## Code Assistant (MCP)",
        "MCP stub: run node agents/mcp/client.js to list project files (placeholder). \
         Integrate real MCP SDK for tool calling.\n",
    );
}

fn multimodal_assistant(s: &mut Scaffold<'_, '_>) {
    if !s.flags.fastapi || !s.has(Category::LlmProviders, "gemini") {
        return;
    }
    let key = env::var(Category::LlmProviders, "gemini", 0);
    append_endpoints(
        s,
        "# Multimodal endpoint (Gemini)",
        &VISION_ENDPOINT.replace("{gemini_key}", key),
    );
    s.readme_section(
        "## Multimodal Assistant",
        "Endpoint POST /vision {\"prompt\":\"...\",\"image_url\":\"...\"} returns model text output (simplified).\n",
    );
}

fn knowledge_base(s: &mut Scaffold<'_, '_>) {
    if !s.flags.fastapi {
        return;
    }
    if s.flags.full_vector_path() {
        ensure_vector_store(s);
        s.sources.put_file("api/knowledge_base.py", with_openai_key(KNOWLEDGE_BASE_PY));
        append_endpoints(s, "# Knowledge Base endpoints", KB_ENDPOINTS);
        s.readme_section(
            "## Knowledge Base",
            "Advanced semantic search with vector database.\nEndpoints: POST /kb/init, /kb/ask, /kb/search\n",
        );
    } else {
        s.sources.put_file("api/kb.py", SIMPLE_KB_PY);
        append_endpoints(s, "# Knowledge Base endpoints", SIMPLE_KB_ENDPOINTS);
        s.readme_section("## Knowledge Base", "Simple keyword-based search system.\n");
    }
}

fn pdf_chat(s: &mut Scaffold<'_, '_>) {
    if !s.flags.fastapi {
        return;
    }
    if s.flags.full_vector_path() {
        ensure_vector_store(s);
        s.sources.put_file("api/pdf_processor.py", PDF_PROCESSOR_PY);
        append_endpoints(s, "# PDF Chat endpoints", &with_openai_key(PDF_ENDPOINTS));
        add_python(s, &["PyPDF2", "tiktoken", "python-multipart"]);
        s.readme_section(
            "## PDF Chat",
            "Upload PDFs and chat with content using vector search.\n\
             Endpoints: POST /pdf/upload, /pdf/chat, GET /pdf/documents\n",
        );
    } else {
        s.sources.put_file("api/pdf_simple.py", PDF_SIMPLE_PY);
        append_endpoints(s, "# PDF Chat endpoints", SIMPLE_PDF_ENDPOINTS);
        add_python(s, &["PyPDF2", "python-multipart"]);
        s.readme_section("## PDF Chat", "Simple PDF text extraction and keyword search.\n");
    }
}

fn vector_ingest(s: &mut Scaffold<'_, '_>) {
    if !s.flags.fastapi {
        return;
    }
    add_python(s, &["python-multipart"]);
    if s.flags.full_vector_path() {
        ensure_vector_store(s);
        s.sources.put_file("api/ingest_pipeline.py", INGEST_PIPELINE_PY);
        append_endpoints(s, "# Vector Ingestion endpoints", INGEST_ENDPOINTS);
        s.readme_section(
            "## Vector Ingest Pipeline",
            "Advanced document ingestion with multiple chunking strategies.\n\
             Endpoints: POST /ingest/file, /ingest/directory, GET /ingest/stats, /ingest/strategies\n\
             Supported strategies: recursive, semantic, fixed\n",
        );
    } else {
        s.sources.put_file("api/simple_ingest.py", SIMPLE_INGEST_MODULE_PY);
        append_endpoints(s, "# Simple ingestion endpoints", SIMPLE_INGEST_ENDPOINTS);
        s.readme_section("## Simple Document Ingest", "Basic file ingestion and keyword search.\n");
    }
}

const VECTOR_STORE: &str = r##""""Vector database integration ({db}) with OpenAI embeddings."""
import os
import uuid
from typing import Dict, List, Optional

from openai import OpenAI
{db_imports}
client = OpenAI(api_key=os.getenv('{openai_key}'))
EMBEDDING_MODEL = 'text-embedding-ada-002'


def embed(texts: List[str]) -> List[List[float]]:
    response = client.embeddings.create(model=EMBEDDING_MODEL, input=texts)
    return [item.embedding for item in response.data]


class VectorStore:
{store}

_store: Optional[VectorStore] = None


def get_vector_store() -> VectorStore:
    global _store
    if _store is None:
        _store = VectorStore()
    return _store
"##;

const PINECONE_IMPORTS: &str = "\nfrom {client_module} import create_index\n";
const PINECONE_STORE: &str = r##"    def __init__(self):
        self.index = create_index()

    def add_documents(self, documents: List[str], metadatas: Optional[List[Dict]] = None):
        vectors = []
        for i, (doc, values) in enumerate(zip(documents, embed(documents))):
            metadata = dict(metadatas[i]) if metadatas else {}
            metadata['text'] = doc
            vectors.append({'id': str(uuid.uuid4()), 'values': values, 'metadata': metadata})
        self.index.upsert(vectors=vectors)

    def similarity_search(self, query: str, k: int = 5) -> List[str]:
        results = self.index.query(vector=embed([query])[0], top_k=k, include_metadata=True)
        return [match['metadata']['text'] for match in results['matches']]
"##;

const CHROMA_IMPORTS: &str = "\nfrom {client_module} import get_or_create_collection\n";
const CHROMA_STORE: &str = r##"    def __init__(self):
        self.collection = get_or_create_collection()

    def add_documents(self, documents: List[str], metadatas: Optional[List[Dict]] = None):
        self.collection.add(
            documents=documents,
            embeddings=embed(documents),
            ids=[str(uuid.uuid4()) for _ in documents],
            metadatas=metadatas or [{'source': 'unknown'} for _ in documents],
        )

    def similarity_search(self, query: str, k: int = 5) -> List[str]:
        results = self.collection.query(query_embeddings=embed([query]), n_results=k)
        return results['documents'][0] if results['documents'] else []
"##;

const WEAVIATE_IMPORTS: &str =
    "\nfrom {client_module} import CLASS_NAME, add_document, create_schema, search_by_vector\n";
const WEAVIATE_STORE: &str = r##"    def __init__(self):
        create_schema()

    def add_documents(self, documents: List[str], metadatas: Optional[List[Dict]] = None):
        for i, (doc, vector) in enumerate(zip(documents, embed(documents))):
            metadata = metadatas[i] if metadatas else {}
            add_document(doc, str(metadata.get('source', 'unknown')), int(metadata.get('chunk_id', i)), vector=vector)

    def similarity_search(self, query: str, k: int = 5) -> List[str]:
        result = search_by_vector(embed([query])[0], limit=k)
        hits = result.get('data', {}).get('Get', {}).get(CLASS_NAME) or []
        return [hit['content'] for hit in hits]
"##;

const QDRANT_IMPORTS: &str = "\nfrom qdrant_client.http import models\n\n\
from {client_module} import add_points, create_collection, search_points\n";
const QDRANT_STORE: &str = r##"    def __init__(self):
        create_collection()

    def add_documents(self, documents: List[str], metadatas: Optional[List[Dict]] = None):
        points = []
        for i, (doc, vector) in enumerate(zip(documents, embed(documents))):
            payload = dict(metadatas[i]) if metadatas else {}
            payload['text'] = doc
            points.append(models.PointStruct(id=str(uuid.uuid4()), vector=vector, payload=payload))
        add_points(points)

    def similarity_search(self, query: str, k: int = 5) -> List[str]:
        hits = search_points(embed([query])[0], limit=k)
        return [hit.payload.get('text', '') for hit in hits]
"##;

const VECTOR_RAG_ENDPOINT: &str = "@app.post('/rag')\n\
async def rag(q: Ask):\n    \
docs = get_vector_store().similarity_search(q.question, k=5)\n    \
return {'question': q.question, 'retrieved_chunks': docs, 'num_results': len(docs)}\n";

const VECTOR_INGEST_PY: &str = r##""""Ingest sample documents into the vector database."""
from typing import List, Optional

from .vector_store import get_vector_store

SAMPLE_DOCS = [
    'GenAppXpress is a rapid application scaffolding tool that generates full-stack applications with AI integration.',
    'RAG (Retrieval Augmented Generation) combines vector search with language models for enhanced context.',
    'FastAPI provides high-performance async APIs with automatic documentation generation.',
    'LangChain enables composable LLM workflows with memory, tools, and agent capabilities.',
    'Vector databases store embeddings for semantic similarity search.',
    'Chunking strategies improve retrieval by breaking documents into optimal sizes.',
]


def ingest_documents(documents: Optional[List[str]] = None):
    documents = documents or SAMPLE_DOCS
    store = get_vector_store()
    metadatas = [{'source': 'sample_docs', 'chunk_id': i} for i in range(len(documents))]
    print(f'Ingesting {len(documents)} documents...')
    store.add_documents(documents, metadatas)
    print('Documents ingested.')
    for i, result in enumerate(store.similarity_search('What is RAG?', k=3), 1):
        print(f'{i}. {result[:100]}')


if __name__ == '__main__':
    ingest_documents()
"##;

const SIMPLE_EMBEDDINGS_PY: &str = r##""""Simple in-memory embedding store (character code mean vector)."""
from typing import List, Tuple

STORE: List[Tuple[str, float]] = []


def embed(text: str) -> float:
    if not text:
        return 0.0
    return sum(ord(c) for c in text) / len(text)


def add(doc: str):
    STORE.append((doc, embed(doc)))


def similarity(a: float, b: float) -> float:
    if not (a or b):
        return 0.0
    return 1.0 - abs(a - b) / (max(a, b) + 1e-6)


def topk(query: str, k: int = 3) -> List[str]:
    qv = embed(query)
    scored = sorted(((doc, similarity(qv, dv)) for doc, dv in STORE), key=lambda x: x[1], reverse=True)
    return [d for d, _ in scored[:k]]
"##;

const SIMPLE_INGEST_PY: &str = r##""""Load sample documents into the in-memory embedding store."""
from .embeddings import STORE, add

SAMPLE = [
    'GenAppXpress scaffolds projects.',
    'Retrieval augments context.',
    'OpenAI provides powerful models.',
]


def ingest():
    if not STORE:
        for doc in SAMPLE:
            add(doc)
    return len(STORE)


if __name__ == '__main__':
    print('Ingested', ingest(), 'documents')
"##;

const SIMPLE_RAG_ENDPOINT: &str = "from .embeddings import topk\n\
from .ingest import ingest\n\n\
ingest()\n\n\
@app.post('/rag')\n\
async def rag(q: Ask):\n    \
docs = topk(q.question)\n    \
return {'question': q.question, 'retrieved_chunks': docs, 'num_results': len(docs)}\n";

const WEB_RESEARCH_PY: &str = r##""""Collect page titles from a preset URL list."""
import requests
from bs4 import BeautifulSoup
{crew_imports}
URLS = ['https://example.com', 'https://www.iana.org/domains/reserved']


def fetch_title(url: str):
    try:
        html = requests.get(url, timeout=10).text
        title = BeautifulSoup(html, 'html.parser').title
        return (url, title.get_text(strip=True) if title else 'No Title')
    except Exception as e:
        return (url, f'Error: {e}')

{crew}
if __name__ == '__main__':
    results = [fetch_title(u) for u in URLS]
    print('Collected:', results)
    print('Summary: Titles collected for', len(results), 'pages.')
"##;

const WEB_RESEARCH_CREW_IMPORTS: &str = "from crewai import Agent, Crew, Task\n";

const WEB_RESEARCH_CREW: &str = r##"
researcher = Agent(role='Researcher', goal='Collect page titles', backstory='Find concise titles', allow_delegation=False)
summarizer = Agent(role='Summarizer', goal='Summarize findings', backstory='Combine results', allow_delegation=False)
research_task = Task(description='Fetch titles from a preset URL list', expected_output='List of (url, title) pairs', agent=researcher)
summary_task = Task(description='Summarize the titles into one sentence', expected_output='One sentence', agent=summarizer, context=[research_task])
crew = Crew(agents=[researcher, summarizer], tasks=[research_task, summary_task])
"##;

const PROCESS_AUTOMATOR_PY: &str = r##""""CrewAI process automation skeleton."""
from crewai import Agent, Crew, Task

planner = Agent(role='Planner', goal='Break a workflow request into steps', backstory='Understands processes')
executor = Agent(role='Executor', goal='Execute a single described step', backstory='Carries out instructions precisely')
reviewer = Agent(role='Reviewer', goal='Validate outputs', backstory='Checks quality')

plan_task = Task(description='Create 3 high level steps to onboard a new engineer', expected_output='Three steps', agent=planner)
exec_tasks = [
    Task(description=f'Execute step {i}', expected_output=f'Result of step {i}', agent=executor, context=[plan_task])
    for i in range(1, 4)
]
review_task = Task(description='Review execution outputs', expected_output='Review notes', agent=reviewer, context=exec_tasks)

if __name__ == '__main__':
    crew = Crew(agents=[planner, executor, reviewer], tasks=[plan_task, *exec_tasks, review_task])
    print('Automation run starting...')
    print(crew.kickoff())
"##;

const MCP_CLIENT_JS: &str = r##"#!/usr/bin/env node
// Minimal MCP-style client: lists files and previews the first one.
import fs from 'fs';
import path from 'path';
import { fileURLToPath } from 'url';

function listFiles(dir) {
  return fs.readdirSync(dir).slice(0, 50);
}

function readFileSafe(p) {
  try {
    return fs.readFileSync(p, 'utf8').slice(0, 2000);
  } catch (e) {
    return 'ERR:' + e.message;
  }
}

if (process.argv[1] === fileURLToPath(import.meta.url)) {
  const dir = process.argv[2] || '.';
  const files = listFiles(dir);
  console.log('Files:', files);
  if (files[0]) {
    console.log('Preview of', files[0], ':');
    console.log(readFileSafe(path.join(dir, files[0])));
  }
}
"##;

const MCP_FS_TOOL_JS: &str = r##"import fs from 'fs';

// Tool handler shape: list files in a directory.
export function list(dir = '.') {
  return { files: fs.readdirSync(dir) };
}
"##;

const VISION_ENDPOINT: &str = r##"from fastapi import Body
import urllib.request

@app.post('/vision')
async def vision(payload: dict = Body(...)):
    import google.generativeai as genai
    genai.configure(api_key=os.getenv('{gemini_key}'))
    model = genai.GenerativeModel('gemini-1.5-flash')
    parts = [payload.get('prompt', 'Describe image')]
    image_url = payload.get('image_url')
    if image_url:
        with urllib.request.urlopen(image_url) as r:
            parts.append({'mime_type': r.headers.get_content_type(), 'data': r.read()})
    resp = model.generate_content(parts)
    return {'text': resp.text}
"##;

const KNOWLEDGE_BASE_PY: &str = r##""""Knowledge base backed by the vector store."""
import os
from typing import Any, Dict, List

from openai import OpenAI

from .vector_store import get_vector_store

client = OpenAI(api_key=os.getenv('{openai_key}'))

KNOWLEDGE_DOCS = [
    'GenAppXpress scaffolds full-stack applications with AI integration.',
    'Vector databases enable semantic search over embeddings of text content.',
    'RAG combines retrieval systems with generative models for grounded answers.',
    'FastAPI provides high-performance async endpoints with automatic documentation.',
    'Chunking strategies matter for retrieval; typical sizes range from 200 to 1000 tokens.',
]


class KnowledgeBase:
    def initialize_kb(self):
        get_vector_store().add_documents(
            KNOWLEDGE_DOCS,
            [{'source': 'kb_init', 'chunk_id': i} for i in range(len(KNOWLEDGE_DOCS))],
        )

    def search(self, query: str, k: int = 5) -> List[str]:
        return get_vector_store().similarity_search(query, k=k)

    def ask(self, question: str) -> Dict[str, Any]:
        context_docs = self.search(question, k=3)
        context = '\n'.join(context_docs)
        prompt = f'Answer the question based on the following context:\n\n{context}\n\nQuestion: {question}\nAnswer:'
        try:
            response = client.chat.completions.create(
                model='gpt-4o-mini',
                messages=[{'role': 'user', 'content': prompt}],
                max_tokens=200,
                temperature=0.1,
            )
            return {
                'question': question,
                'answer': response.choices[0].message.content.strip(),
                'sources': context_docs,
            }
        except Exception as e:
            return {'question': question, 'error': str(e), 'sources': context_docs}


kb = KnowledgeBase()
"##;

const KB_ENDPOINTS: &str = r##"from .knowledge_base import kb

@app.post('/kb/init')
async def init_kb():
    kb.initialize_kb()
    return {'message': 'Knowledge base initialized'}

@app.post('/kb/ask')
async def ask_kb(q: Ask):
    return kb.ask(q.question)

@app.post('/kb/search')
async def search_kb(q: Ask):
    return {'query': q.question, 'results': kb.search(q.question, k=5)}
"##;

const SIMPLE_KB_PY: &str = r##""""Knowledge base with simple keyword search."""
from typing import List

KNOWLEDGE = [
    'GenAppXpress accelerates development with AI scaffolding',
    'FastAPI handles async requests with automatic documentation',
    'React provides dynamic UIs with component architecture',
    'Vector databases enable semantic search capabilities',
    'RAG combines retrieval with generation for better answers',
]


def search(query: str, k: int = 3) -> List[str]:
    words = set(query.lower().split())
    scored = [(sum(w in doc.lower() for w in words), doc) for doc in KNOWLEDGE]
    return [doc for score, doc in sorted(scored, reverse=True) if score > 0][:k]
"##;

const SIMPLE_KB_ENDPOINTS: &str = r##"from .kb import search as kb_search

@app.post('/kb/search')
async def search_kb(q: Ask):
    return {'query': q.question, 'results': kb_search(q.question)}
"##;

const PDF_PROCESSOR_PY: &str = r##""""PDF extraction and token-based chunking into the vector store."""
from io import BytesIO
from typing import Any, Dict, List

import PyPDF2
import tiktoken

from .vector_store import get_vector_store


class PDFProcessor:
    def __init__(self, chunk_tokens: int = 500, overlap: int = 50):
        self.chunk_tokens = chunk_tokens
        self.overlap = overlap
        self.encoding = tiktoken.get_encoding('cl100k_base')
        self.documents: List[Dict[str, Any]] = []

    def extract_text(self, pdf_bytes: bytes) -> str:
        reader = PyPDF2.PdfReader(BytesIO(pdf_bytes))
        return '\n'.join(page.extract_text() or '' for page in reader.pages)

    def chunk(self, text: str) -> List[str]:
        tokens = self.encoding.encode(text)
        step = max(self.chunk_tokens - self.overlap, 1)
        return [self.encoding.decode(tokens[i:i + self.chunk_tokens]) for i in range(0, len(tokens), step)]

    def process_pdf(self, pdf_bytes: bytes, filename: str) -> Dict[str, Any]:
        chunks = [c for c in self.chunk(self.extract_text(pdf_bytes)) if c.strip()]
        if not chunks:
            return {'error': 'No text found in PDF'}
        metadatas = [{'source': filename, 'chunk_id': i} for i in range(len(chunks))]
        get_vector_store().add_documents(chunks, metadatas)
        self.documents.append({'filename': filename, 'chunks': len(chunks)})
        return {'filename': filename, 'chunks': len(chunks)}

    def search_documents(self, query: str, k: int = 3) -> List[str]:
        return get_vector_store().similarity_search(query, k=k)


pdf_processor = PDFProcessor()
"##;

const PDF_ENDPOINTS: &str = r##"from fastapi import File, UploadFile
from openai import OpenAI
from .pdf_processor import pdf_processor

pdf_client = OpenAI(api_key=os.getenv('{openai_key}'))

@app.post('/pdf/upload')
async def upload_pdf(file: UploadFile = File(...)):
    if not file.filename.endswith('.pdf'):
        return {'error': 'File must be a PDF'}
    return pdf_processor.process_pdf(await file.read(), file.filename)

@app.post('/pdf/chat')
async def chat_with_pdf(q: Ask):
    context_docs = pdf_processor.search_documents(q.question, k=3)
    if not context_docs:
        return {'error': 'No documents found. Please upload a PDF first.'}
    context = '\n\n'.join(context_docs)
    prompt = f'Answer the question based on the following PDF content:\n\n{context}\n\nQuestion: {q.question}\nAnswer:'
    try:
        response = pdf_client.chat.completions.create(
            model='gpt-4o-mini',
            messages=[{'role': 'user', 'content': prompt}],
            max_tokens=200,
            temperature=0.1,
        )
        return {
            'question': q.question,
            'answer': response.choices[0].message.content.strip(),
            'sources': len(context_docs),
        }
    except Exception as e:
        return {'error': f'Error generating response: {e}'}

@app.get('/pdf/documents')
async def list_documents():
    return {'documents': pdf_processor.documents}
"##;

const PDF_SIMPLE_PY: &str = r##""""Simple PDF text extraction with keyword search, no vector storage."""
from io import BytesIO
from typing import Dict, List

import PyPDF2

TEXTS: Dict[str, str] = {}


def extract_pdf_text(pdf_bytes: bytes) -> str:
    reader = PyPDF2.PdfReader(BytesIO(pdf_bytes))
    return '\n'.join(page.extract_text() or '' for page in reader.pages)


def store(filename: str, pdf_bytes: bytes) -> int:
    TEXTS[filename] = extract_pdf_text(pdf_bytes)
    return len(TEXTS[filename])


def search(query: str) -> List[Dict[str, str]]:
    words = query.lower().split()
    hits = []
    for name, text in TEXTS.items():
        for line in text.splitlines():
            if any(w in line.lower() for w in words):
                hits.append({'file': name, 'line': line.strip()})
    return hits[:10]
"##;

const SIMPLE_PDF_ENDPOINTS: &str = r##"from fastapi import File, UploadFile
from . import pdf_simple

@app.post('/pdf/upload')
async def upload_pdf(file: UploadFile = File(...)):
    if not file.filename.endswith('.pdf'):
        return {'error': 'File must be a PDF'}
    return {'filename': file.filename, 'characters': pdf_simple.store(file.filename, await file.read())}

@app.post('/pdf/search')
async def search_pdf(q: Ask):
    return {'query': q.question, 'results': pdf_simple.search(q.question)}
"##;

const INGEST_PIPELINE_PY: &str = r##""""Document ingestion pipeline with pluggable chunking strategies."""
import re
from pathlib import Path
from typing import Any, Dict, List

from .vector_store import get_vector_store


def _fixed(text: str, size: int, overlap: int) -> List[str]:
    step = max(size - overlap, 1)
    return [text[i:i + size] for i in range(0, len(text), step)]


def _recursive(text: str, size: int, overlap: int) -> List[str]:
    chunks: List[str] = []
    current = ''
    for para in re.split(r'\n\s*\n', text):
        if len(current) + len(para) + 2 <= size:
            current = f'{current}\n\n{para}' if current else para
            continue
        if current:
            chunks.append(current)
        current = para if len(para) <= size else ''
        if len(para) > size:
            chunks.extend(_fixed(para, size, overlap))
    if current:
        chunks.append(current)
    return chunks


def _semantic(text: str, size: int, overlap: int) -> List[str]:
    sentences = re.split(r'(?<=[.!?])\s+', text)
    chunks: List[str] = []
    current = ''
    for sentence in sentences:
        if current and len(current) + len(sentence) + 1 > size:
            chunks.append(current)
            current = sentence
        else:
            current = f'{current} {sentence}'.strip()
    if current:
        chunks.append(current)
    return chunks


class IngestPipeline:
    def __init__(self):
        self.strategies: Dict[str, Dict[str, int]] = {
            'recursive': {'chunk_size': 1000, 'overlap': 200},
            'semantic': {'chunk_size': 800, 'overlap': 0},
            'fixed': {'chunk_size': 500, 'overlap': 50},
        }
        self._splitters = {'recursive': _recursive, 'semantic': _semantic, 'fixed': _fixed}
        self.stats = {'files': 0, 'chunks': 0, 'errors': 0}

    def chunk(self, text: str, strategy: str) -> List[str]:
        config = self.strategies.get(strategy, self.strategies['recursive'])
        splitter = self._splitters.get(strategy, _recursive)
        return [c for c in splitter(text, config['chunk_size'], config['overlap']) if c.strip()]

    def ingest_file(self, file_path: str, strategy: str = 'recursive') -> Dict[str, Any]:
        path = Path(file_path)
        try:
            text = path.read_text(encoding='utf-8')
        except Exception as e:
            self.stats['errors'] += 1
            return {'file': file_path, 'error': str(e)}
        chunks = self.chunk(text, strategy)
        if chunks:
            metadatas = [{'source': path.name, 'chunk_id': i} for i in range(len(chunks))]
            get_vector_store().add_documents(chunks, metadatas)
        self.stats['files'] += 1
        self.stats['chunks'] += len(chunks)
        return {'file': file_path, 'strategy': strategy, 'chunks': len(chunks)}

    def ingest_directory(self, dir_path: str, strategy: str = 'recursive', pattern: str = '**/*') -> Dict[str, Any]:
        results = [self.ingest_file(str(p), strategy) for p in Path(dir_path).glob(pattern) if p.is_file()]
        return {'directory': dir_path, 'files': len(results), 'results': results}

    def get_stats(self) -> Dict[str, int]:
        return dict(self.stats)


ingestor = IngestPipeline()
"##;

const INGEST_ENDPOINTS: &str = r##"from fastapi import Form
from .ingest_pipeline import ingestor

@app.post('/ingest/file')
async def ingest_file(file_path: str = Form(...), strategy: str = Form('recursive')):
    return ingestor.ingest_file(file_path, strategy)

@app.post('/ingest/directory')
async def ingest_directory(dir_path: str = Form(...), strategy: str = Form('recursive'), pattern: str = Form('**/*')):
    return ingestor.ingest_directory(dir_path, strategy, pattern)

@app.get('/ingest/stats')
async def get_ingest_stats():
    return ingestor.get_stats()

@app.get('/ingest/strategies')
async def get_strategies():
    return {'strategies': list(ingestor.strategies.keys()), 'configs': ingestor.strategies}
"##;

const SIMPLE_INGEST_MODULE_PY: &str = r##""""Simple document ingestion without vector storage."""
from pathlib import Path
from typing import Any, Dict, List

document_store: List[Dict[str, str]] = []


def ingest_file(file_path: str) -> Dict[str, Any]:
    path = Path(file_path)
    try:
        content = path.read_text(encoding='utf-8')
    except Exception as e:
        return {'file': file_path, 'error': str(e)}
    document_store.append({'source': path.name, 'content': content})
    return {'file': file_path, 'characters': len(content)}


def search(query: str, k: int = 5) -> List[Dict[str, str]]:
    words = query.lower().split()
    hits = [d for d in document_store if any(w in d['content'].lower() for w in words)]
    return hits[:k]
"##;

const SIMPLE_INGEST_ENDPOINTS: &str = r##"from fastapi import Form
from . import simple_ingest

@app.post('/ingest/file')
async def ingest_file(file_path: str = Form(...)):
    return simple_ingest.ingest_file(file_path)

@app.post('/ingest/search')
async def ingest_search(q: Ask):
    return {'query': q.question, 'results': simple_ingest.search(q.question)}
"##;
