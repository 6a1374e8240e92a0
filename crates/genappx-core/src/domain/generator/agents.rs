//! `agents/`: provider clients, framework examples and the runner.

use super::Scaffold;
use crate::domain::entities::selection::Selection;
use crate::domain::env;
use crate::domain::generator::packages::python_packages_for;
use crate::domain::value_objects::Category;

/// Framework id → (display name, script file).
static FRAMEWORK_SCRIPTS: &[(&str, &str, &str)] = &[
    ("langchain", "LangChain", "agent_langchain.py"),
    ("crewai", "CrewAI", "agent_crewai.py"),
    ("langgraph", "LangGraph", "agent_langgraph.py"),
    ("semantic-kernel", "Semantic Kernel", "agent_sk.py"),
    ("autogen", "AutoGen", "agent_autogen.py"),
];

pub(super) fn emit(s: &mut Scaffold<'_, '_>) {
    let selection = s.selection;

    for id in selection.ids(Category::LlmProviders) {
        if let Some(client) = provider_client(id) {
            s.sources.put_file(&format!("agents/providers/{id}_client.py"), client);
        }
        for pkg in python_packages_for(Category::LlmProviders, id) {
            s.python.insert((*pkg).to_string());
        }
    }

    let mut scripts = Vec::new();
    for id in selection.ids(Category::AiFrameworks) {
        let Some((_, label, file)) = FRAMEWORK_SCRIPTS.iter().find(|(i, _, _)| *i == id) else {
            continue;
        };
        let (content, extra) = framework_example(id, selection);
        s.sources.put_file(&format!("agents/{file}"), content);
        for pkg in python_packages_for(Category::AiFrameworks, id).iter().chain(extra) {
            s.python.insert((*pkg).to_string());
        }
        scripts.push((*label, *file));
    }

    if selection.has_any(Category::LlmProviders) || !scripts.is_empty() {
        s.sources.put_file("agents/run_all_agents.py", run_all(&scripts));
    }
}

fn provider_client(id: &str) -> Option<String> {
    let key = env::var(Category::LlmProviders, id, 0);
    let body = match id {
        "openai" => format!(
            "from openai import OpenAI\nimport os\n\n\
             client = OpenAI(api_key=os.getenv('{key}'))\n\n\
             if __name__ == '__main__':\n    \
             resp = client.chat.completions.create(model='gpt-4o-mini', messages=[{{'role': 'user', 'content': 'Hello from OpenAI'}}])\n    \
             print(resp.choices[0].message.content)\n"
        ),
        "anthropic" => format!(
            "import os\n\nimport anthropic\n\n\
             client = anthropic.Anthropic(api_key=os.getenv('{key}'))\n\n\
             if __name__ == '__main__':\n    \
             msg = client.messages.create(model='claude-3-5-sonnet-latest', max_tokens=50, messages=[{{'role': 'user', 'content': 'Hello from Anthropic'}}])\n    \
             print(msg.content[0].text)\n"
        ),
        "gemini" => format!(
            "import os\n\nimport google.generativeai as genai\n\n\
             genai.configure(api_key=os.getenv('{key}'))\n\n\
             if __name__ == '__main__':\n    \
             model = genai.GenerativeModel('gemini-1.5-flash')\n    \
             resp = model.generate_content('Hello from Gemini')\n    \
             print(resp.text)\n"
        ),
        "xai" => format!(
            "import os\n\nfrom groq import Groq\n\n\
             client = Groq(api_key=os.getenv('{key}'))\n\n\
             if __name__ == '__main__':\n    \
             resp = client.chat.completions.create(model='grok-beta', messages=[{{'role': 'user', 'content': 'Hello from Grok'}}])\n    \
             print(resp.choices[0].message.content)\n"
        ),
        "ollama" => format!(
            "import os\n\nimport requests\n\n\
             {base}\n\
             if __name__ == '__main__':\n    \
             r = requests.post(ollama_base() + '/api/generate', json={{'model': 'llama3', 'prompt': 'Hello from Ollama', 'stream': False}})\n    \
             print(r.json())\n",
            base = ollama_base_py(),
        ),
        _ => return None,
    };
    Some(body)
}

/// Python helper turning `OLLAMA_HOST` into a base URL.
pub(super) fn ollama_base_py() -> String {
    let key = env::var(Category::LlmProviders, "ollama", 0);
    format!(
        "def ollama_base():\n    \
         host = os.getenv('{key}', 'localhost')\n    \
         if not host.startswith('http'):\n        \
         host = 'http://' + host\n    \
         if host.count(':') < 2:\n        \
         host += ':11434'\n    \
         return host\n"
    )
}

/// LangChain chat model import for the first provider it has an integration for.
fn langchain_model(selection: &Selection<'_>) -> Option<(String, &'static [&'static str])> {
    let p = |id| selection.has(Category::LlmProviders, id);
    let model: (String, &'static [&'static str]) = if p("openai") {
        let key = env::var(Category::LlmProviders, "openai", 0);
        (
            format!(
                "from langchain_openai import ChatOpenAI\n\n\
                 model = ChatOpenAI(api_key=os.getenv('{key}'), model='gpt-4o-mini', temperature=0)\n"
            ),
            &["langchain-openai"],
        )
    } else if p("anthropic") {
        let key = env::var(Category::LlmProviders, "anthropic", 0);
        (
            format!(
                "from langchain_anthropic import ChatAnthropic\n\n\
                 model = ChatAnthropic(api_key=os.getenv('{key}'), model='claude-3-5-sonnet-latest', temperature=0)\n"
            ),
            &["langchain-anthropic"],
        )
    } else if p("gemini") {
        let key = env::var(Category::LlmProviders, "gemini", 0);
        (
            format!(
                "from langchain_google_genai import ChatGoogleGenerativeAI\n\n\
                 model = ChatGoogleGenerativeAI(google_api_key=os.getenv('{key}'), model='gemini-1.5-flash', temperature=0)\n"
            ),
            &["langchain-google-genai"],
        )
    } else if p("ollama") {
        (
            format!(
                "from langchain_community.chat_models import ChatOllama\n\n\
                 {base}\n\
                 model = ChatOllama(base_url=ollama_base(), model='llama3', temperature=0)\n",
                base = ollama_base_py(),
            ),
            &["langchain-community"],
        )
    } else {
        return None;
    };
    Some(model)
}

fn framework_example(id: &str, selection: &Selection<'_>) -> (String, &'static [&'static str]) {
    match id {
        "langchain" => match langchain_model(selection) {
            Some((model, extra)) => (
                format!(
                    "\"\"\"LangChain quickstart example.\"\"\"\n\
                     import os\n\n\
                     from langchain_core.prompts import ChatPromptTemplate\n\
                     {model}\n\
                     prompt = ChatPromptTemplate.from_messages([('system', 'You are concise.'), ('user', '{{q}}')])\n\
                     chain = prompt | model\n\n\
                     if __name__ == '__main__':\n    \
                     print(chain.invoke({{'q': 'Say hi in 5 words.'}}))\n"
                ),
                extra,
            ),
            None => (
                "\"\"\"LangChain quickstart example (no model provider selected).\"\"\"\n\
                 from langchain_core.prompts import ChatPromptTemplate\n\
                 from langchain_core.runnables import RunnableLambda\n\n\
                 prompt = ChatPromptTemplate.from_messages([('system', 'You are concise.'), ('user', '{q}')])\n\
                 echo = RunnableLambda(lambda value: value.to_messages()[-1].content)\n\
                 chain = prompt | echo\n\n\
                 if __name__ == '__main__':\n    \
                 print(chain.invoke({'q': 'Say hi in 5 words.'}))\n"
                    .to_string(),
                &[],
            ),
        },
        "crewai" => (
            "\"\"\"CrewAI mini crew.\"\"\"\n\
             from crewai import Agent, Crew, Task\n\n\
             assistant = Agent(role='Helper', goal='Assist briefly', backstory='A helpful AI', allow_delegation=False)\n\
             job = Task(description='Give one-sentence motivation', expected_output='One sentence', agent=assistant)\n\n\
             if __name__ == '__main__':\n    \
             crew = Crew(agents=[assistant], tasks=[job])\n    \
             print(crew.kickoff())\n"
                .to_string(),
            &[],
        ),
        "langgraph" => (
            "\"\"\"LangGraph minimal graph.\"\"\"\n\
             from typing import TypedDict\n\n\
             from langgraph.graph import END, StateGraph\n\n\n\
             class State(TypedDict, total=False):\n    \
             msg: str\n\n\n\
             def one(s: State) -> State:\n    \
             return {'msg': 'Hello'}\n\n\n\
             def two(s: State) -> State:\n    \
             return {'msg': s['msg'] + ' Graph'}\n\n\n\
             sg = StateGraph(State)\n\
             sg.add_node('one', one)\n\
             sg.add_node('two', two)\n\
             sg.set_entry_point('one')\n\
             sg.add_edge('one', 'two')\n\
             sg.add_edge('two', END)\n\
             app = sg.compile()\n\n\
             if __name__ == '__main__':\n    \
             print(app.invoke({}))\n"
                .to_string(),
            &[],
        ),
        "semantic-kernel" => (semantic_kernel(selection), &[]),
        "autogen" => (
            "\"\"\"AutoGen simple chat.\"\"\"\n\
             from autogen import AssistantAgent, UserProxyAgent\n\n\
             assistant = AssistantAgent('assistant')\n\
             user = UserProxyAgent('user', code_execution_config=False)\n\n\
             if __name__ == '__main__':\n    \
             user.initiate_chat(assistant, message='Say hi succinctly.')\n"
                .to_string(),
            &[],
        ),
        _ => (String::new(), &[]),
    }
}

fn semantic_kernel(selection: &Selection<'_>) -> String {
    if selection.has(Category::LlmProviders, "openai") {
        let key = env::var(Category::LlmProviders, "openai", 0);
        format!(
            "\"\"\"Semantic Kernel sample.\"\"\"\n\
             import asyncio\n\
             import os\n\n\
             import semantic_kernel as sk\n\
             from semantic_kernel.connectors.ai.open_ai import OpenAIChatCompletion\n\
             from semantic_kernel.contents import ChatHistory\n\n\n\
             async def main():\n    \
             kernel = sk.Kernel()\n    \
             if not os.getenv('{key}'):\n        \
             print('No {key} set.')\n        \
             return\n    \
             service = OpenAIChatCompletion(service_id='openai', api_key=os.getenv('{key}'), ai_model_id='gpt-4o-mini')\n    \
             kernel.add_service(service)\n    \
             history = ChatHistory()\n    \
             history.add_user_message('Write a 4 word motto.')\n    \
             settings = kernel.get_prompt_execution_settings_from_service_id('openai')\n    \
             reply = await service.get_chat_message_content(history, settings)\n    \
             print(reply)\n\n\n\
             if __name__ == '__main__':\n    \
             asyncio.run(main())\n"
        )
    } else {
        "\"\"\"Semantic Kernel sample (no OpenAI connector selected).\"\"\"\n\
         import semantic_kernel as sk\n\n\
         if __name__ == '__main__':\n    \
         kernel = sk.Kernel()\n    \
         print('Kernel ready; add a chat completion service to run prompts.')\n"
            .to_string()
    }
}

fn run_all(scripts: &[(&str, &str)]) -> String {
    let list = scripts
        .iter()
        .map(|(label, file)| format!("('{label}', '{file}')"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "\"\"\"Run all available agent example scripts sequentially.\"\"\"\n\
         import os\n\
         import subprocess\n\
         import sys\n\n\
         ROOT = os.path.dirname(__file__)\n\
         SCRIPTS = [{list}]\n\n\
         if __name__ == '__main__':\n    \
         if not SCRIPTS:\n        \
         print('No agent scripts selected.')\n    \
         for name, script in SCRIPTS:\n        \
         path = os.path.join(ROOT, script)\n        \
         if os.path.exists(path):\n            \
         print(f'\\n=== {{name}} ({{script}}) ===')\n            \
         subprocess.run([sys.executable, path], check=False)\n        \
         else:\n            \
         print('Missing', script)\n"
    )
}
