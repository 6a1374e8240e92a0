//! Frontend entry files (React, Vue, Next.js).

use super::{Flags, Scaffold};
use crate::domain::entities::file_tree::Directory;
use crate::domain::value_objects::Category;

const CHAT_COMPONENT: &str = "ChatClient";

type Emitter = fn(&Flags, &str, &mut Directory);

/// Frontend id → emitter. Runs in selection order.
static FRONTEND_EMITTERS: &[(&str, Emitter)] = &[
    ("react", react),
    ("vue", vue),
    ("nextjs", next),
];

pub(super) fn emit(s: &mut Scaffold<'_, '_>) {
    let selection = s.selection;
    let flags = s.flags;
    let name = selection.project_name().as_str();
    for id in selection.ids(Category::Frontend) {
        if let Some((_, emitter)) = FRONTEND_EMITTERS.iter().find(|(i, _)| *i == id) {
            emitter(&flags, name, s.sources.dir_mut("src"));
        }
    }
}

/// Chat UI is wired when React talks to a backend that has a model behind it.
pub(super) fn wants_chat_ui(flags: &Flags) -> bool {
    flags.react && flags.any_provider && flags.any_backend()
}

fn react(flags: &Flags, name: &str, src: &mut Directory) {
    let ext = flags.jsx();
    let chat = wants_chat_ui(flags);
    if chat {
        src.put_file(&format!("components/{CHAT_COMPONENT}.{ext}"), chat_component(flags.typescript));
    }

    let import = if chat {
        format!("\nimport {CHAT_COMPONENT} from './components/{CHAT_COMPONENT}';")
    } else {
        String::new()
    };
    let mount = if chat { format!("<{CHAT_COMPONENT} />") } else { String::new() };
    src.put_file(
        &format!("App.{ext}"),
        format!(
            "import React from 'react';{import}\n\
             export default function App(){{\n  \
             return <div style={{{{fontFamily:'sans-serif',padding:32}}}}><h1>{name}</h1><p>Generated with GenAppXpress.</p>{mount}</div>;\n\
             }}\n"
        ),
    );
    src.put_file(
        &format!("main.{ext}"),
        format!(
            "import React from 'react';\n\
             import {{ createRoot }} from 'react-dom/client';\n\
             import App from './App.{ext}';\n\
             const rootEl = document.getElementById('root');\n\
             if(rootEl){{ createRoot(rootEl).render(<App />); }}\n"
        ),
    );
}

fn chat_component(typescript: bool) -> String {
    let (state_ty, event_ty, err_msg) = if typescript {
        (
            "<{ role: string; content: string }[]>",
            "e: React.FormEvent",
            "(err as Error).message",
        )
    } else {
        ("", "e", "err.message")
    };
    format!(
        r#"import React, {{ useState }} from 'react';

export default function {CHAT_COMPONENT}() {{
  const [messages, setMessages] = useState{state_ty}([]);
  const [input, setInput] = useState('');

  async function send({event_ty}) {{
    e.preventDefault();
    if (!input.trim()) return;
    const userMsg = {{ role: 'user', content: input }};
    setMessages(m => [...m, userMsg]);
    setInput('');
    try {{
      const r = await fetch('/api/chat', {{
        method: 'POST',
        headers: {{ 'Content-Type': 'application/json' }},
        body: JSON.stringify({{ message: userMsg.content }}),
      }});
      const j = await r.json();
      setMessages(m => [...m, {{ role: 'assistant', content: j.reply || JSON.stringify(j) }}]);
    }} catch (err) {{
      setMessages(m => [...m, {{ role: 'assistant', content: 'Error: ' + {err_msg} }}]);
    }}
  }}

  return (
    <div style={{{{ border: '1px solid #ccc', borderRadius: 8, padding: 16, marginTop: 24 }}}}>
      <h3 style={{{{ marginTop: 0 }}}}>Chat</h3>
      <div style={{{{ maxHeight: 200, overflow: 'auto', background: '#111b1c', color: '#d6f2f4', padding: 8, borderRadius: 6, fontFamily: 'monospace', fontSize: 12 }}}}>
        {{messages.map((m, i) => (
          <div key={{i}}><strong>{{m.role === 'user' ? 'You' : 'AI'}}:</strong> {{m.content}}</div>
        ))}}
      </div>
      <form onSubmit={{send}} style={{{{ display: 'flex', gap: 8, marginTop: 8 }}}}>
        <input value={{input}} onChange={{e => setInput(e.target.value)}} placeholder="Ask something..." style={{{{ flex: 1, padding: 8 }}}} />
        <button type="submit">Send</button>
      </form>
    </div>
  );
}}
"#
    )
}

fn vue(_flags: &Flags, name: &str, src: &mut Directory) {
    src.put_file(
        "main.js",
        format!(
            "import {{ createApp }} from 'vue';\n\
             const App = {{\n  \
             template: `<div style=\"font-family:sans-serif;padding:32px\"><h1>{name}</h1><p>Generated with GenAppXpress (Vue).</p></div>`,\n\
             }};\n\
             createApp(App).mount('#root');\n"
        ),
    );
}

fn next(_flags: &Flags, name: &str, src: &mut Directory) {
    src.put_file(
        "pages/index.js",
        format!(
            "export default function Home() {{\n  \
             return (\n    \
             <main style={{{{ fontFamily: 'sans-serif', padding: 32 }}}}>\n      \
             <h1>{name}</h1>\n      \
             <p>Generated with GenAppXpress (Next.js).</p>\n    \
             </main>\n  \
             );\n\
             }}\n"
        ),
    );
}

#[cfg(test)]
mod tests {
    use crate::domain::catalog::Catalog;
    use crate::domain::entities::configuration::Configuration;
    use crate::domain::generator::generate_structure;
    use crate::domain::value_objects::{Category, ProjectName};

    fn cfg() -> Configuration {
        Configuration::new(ProjectName::new("web").unwrap())
    }

    #[test]
    fn react_without_backend_has_no_chat() {
        let tree = generate_structure(
            &Catalog::builtin(),
            &cfg()
                .with(Category::Frontend, ["react"])
                .with(Category::LlmProviders, ["openai"]),
        );
        let root = tree.root();
        assert!(root.contains("src/App.jsx"));
        assert!(root.contains("src/main.jsx"));
        assert!(!root.contains("src/components"));
        assert!(root.file("src/App.jsx").unwrap().contains("<h1>web</h1>"));
    }

    #[test]
    fn chat_component_follows_typescript() {
        let tree = generate_structure(
            &Catalog::builtin(),
            &cfg()
                .with(Category::Frontend, ["react"])
                .with(Category::Backend, ["fastapi"])
                .with(Category::Tools, ["typescript"])
                .with(Category::LlmProviders, ["anthropic"]),
        );
        let root = tree.root();
        let chat = root.file("src/components/ChatClient.tsx").unwrap();
        assert!(chat.contains("fetch('/api/chat'"));
        assert!(chat.contains("React.FormEvent"));
        let app = root.file("src/App.tsx").unwrap();
        assert!(app.contains("import ChatClient from './components/ChatClient';"));
        assert!(app.contains("<ChatClient />"));
        assert!(root.file("src/main.tsx").unwrap().contains("./App.tsx"));
    }

    #[test]
    fn next_pages_live_under_src() {
        let tree = generate_structure(&Catalog::builtin(), &cfg().with(Category::Frontend, ["nextjs"]));
        assert!(tree.root().contains("src/pages/index.js"));
        assert!(tree.root().contains("next.config.js"));
    }
}
