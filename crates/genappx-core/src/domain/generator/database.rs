//! `database/`: schemas, models and vector store clients.

use super::Scaffold;
use crate::domain::env;
use crate::domain::generator::packages::python_packages_for;
use crate::domain::value_objects::Category;

type Emitter = fn() -> (&'static str, String);

/// Database id → (path under `database/`, content).
static DATABASE_EMITTERS: &[(&str, Emitter)] = &[
    ("postgresql", postgresql),
    ("mongodb", mongodb),
    ("redis", redis),
    ("pinecone", pinecone),
    ("chroma", chroma),
    ("weaviate", weaviate),
    ("qdrant", qdrant),
];

pub(super) fn emit(s: &mut Scaffold<'_, '_>) {
    let selection = s.selection;
    for id in selection.ids(Category::Database) {
        let Some((_, emitter)) = DATABASE_EMITTERS.iter().find(|(i, _)| *i == id) else {
            continue;
        };
        let (path, content) = emitter();
        s.sources.put_file(&format!("database/{path}"), content);
        for pkg in python_packages_for(Category::Database, id) {
            s.python.insert((*pkg).to_string());
        }
    }
}

/// Module the vector store imports for a given database.
pub(super) fn client_module(id: &str) -> String {
    format!("database.vector.{id}_client")
}

fn postgresql() -> (&'static str, String) {
    (
        "schema.sql",
        "-- Example PostgreSQL schema\nCREATE TABLE IF NOT EXISTS items (id SERIAL PRIMARY KEY, name TEXT NOT NULL);\n"
            .to_string(),
    )
}

fn mongodb() -> (&'static str, String) {
    (
        "models/index.js",
        "import mongoose from 'mongoose';\n\
         const ItemSchema = new mongoose.Schema({ name: String });\n\
         export const Item = mongoose.model('Item', ItemSchema);\n"
            .to_string(),
    )
}

fn redis() -> (&'static str, String) {
    (
        "redis.js",
        "import Redis from 'ioredis';\nexport const redis = new Redis('redis://localhost:6379');\n".to_string(),
    )
}

fn pinecone() -> (&'static str, String) {
    let key = env::var(Category::Database, "pinecone", 0);
    (
        "vector/pinecone_client.py",
        format!(
            r#""""Pinecone vector database client setup."""
import os
from pinecone import Pinecone, ServerlessSpec

pc = Pinecone(api_key=os.getenv('{key}'))

INDEX_NAME = 'rag-embeddings'
DIMENSION = 1536  # OpenAI ada-002 embeddings


def create_index():
    """Create the index if it does not exist."""
    if INDEX_NAME not in pc.list_indexes().names():
        pc.create_index(
            name=INDEX_NAME,
            dimension=DIMENSION,
            metric='cosine',
            spec=ServerlessSpec(cloud='aws', region='us-east-1'),
        )
    return pc.Index(INDEX_NAME)


def get_index():
    return pc.Index(INDEX_NAME)


if __name__ == '__main__':
    create_index()
    print(f'Connected to Pinecone index: {{INDEX_NAME}}')
"#
        ),
    )
}

fn chroma() -> (&'static str, String) {
    let path = env::var(Category::Database, "chroma", 0);
    (
        "vector/chroma_client.py",
        format!(
            r#""""ChromaDB vector database client setup."""
import os

import chromadb
from chromadb.config import Settings

client = chromadb.PersistentClient(
    path=os.getenv('{path}', './chroma_db'),
    settings=Settings(anonymized_telemetry=False),
)

COLLECTION_NAME = 'rag_documents'


def get_or_create_collection(name=COLLECTION_NAME):
    return client.get_or_create_collection(name=name, metadata={{'hnsw:space': 'cosine'}})


def add_documents(collection, documents, embeddings, ids, metadatas=None):
    collection.add(
        documents=documents,
        embeddings=embeddings,
        ids=ids,
        metadatas=metadatas or [{{}}] * len(documents),
    )


def query_collection(collection, query_embedding, n_results=5):
    return collection.query(query_embeddings=[query_embedding], n_results=n_results)


if __name__ == '__main__':
    get_or_create_collection()
    print(f'ChromaDB collection ready: {{COLLECTION_NAME}}')
"#
        ),
    )
}

fn weaviate() -> (&'static str, String) {
    let url = env::var(Category::Database, "weaviate", 0);
    let key = env::var(Category::Database, "weaviate", 1);
    (
        "vector/weaviate_client.py",
        format!(
            r#""""Weaviate vector database client setup (v3 client API)."""
import os

import weaviate

_api_key = os.getenv('{key}')
client = weaviate.Client(
    url=os.getenv('{url}', 'http://localhost:8080'),
    auth_client_secret=weaviate.AuthApiKey(api_key=_api_key) if _api_key else None,
)

CLASS_NAME = 'Document'
SCHEMA = {{
    'classes': [{{
        'class': CLASS_NAME,
        'description': 'RAG document chunks',
        'vectorizer': 'none',
        'properties': [
            {{'name': 'content', 'dataType': ['text']}},
            {{'name': 'source', 'dataType': ['string']}},
            {{'name': 'chunk_id', 'dataType': ['int']}},
        ],
    }}]
}}


def create_schema():
    try:
        client.schema.create(SCHEMA)
        print('Schema created successfully')
    except Exception as e:
        print(f'Schema might already exist: {{e}}')


def add_document(content, source, chunk_id, vector=None):
    return client.data_object.create(
        data_object={{'content': content, 'source': source, 'chunk_id': chunk_id}},
        class_name=CLASS_NAME,
        vector=vector,
    )


def search_by_vector(vector, limit=5):
    return (
        client.query
        .get(CLASS_NAME, ['content', 'source', 'chunk_id'])
        .with_near_vector({{'vector': vector}})
        .with_limit(limit)
        .do()
    )


if __name__ == '__main__':
    create_schema()
    print('Weaviate client ready')
"#
        ),
    )
}

fn qdrant() -> (&'static str, String) {
    let url = env::var(Category::Database, "qdrant", 0);
    let key = env::var(Category::Database, "qdrant", 1);
    (
        "vector/qdrant_client.py",
        format!(
            r#""""Qdrant vector database client setup."""
import os

from qdrant_client import QdrantClient
from qdrant_client.http import models

client = QdrantClient(
    url=os.getenv('{url}', 'http://localhost:6333'),
    api_key=os.getenv('{key}') or None,
)

COLLECTION_NAME = 'rag_documents'
VECTOR_SIZE = 1536  # OpenAI ada-002 embeddings


def create_collection():
    try:
        client.create_collection(
            collection_name=COLLECTION_NAME,
            vectors_config=models.VectorParams(size=VECTOR_SIZE, distance=models.Distance.COSINE),
        )
        print(f"Collection '{{COLLECTION_NAME}}' created")
    except Exception as e:
        print(f'Collection might already exist: {{e}}')


def add_points(points):
    return client.upsert(collection_name=COLLECTION_NAME, points=points)


def search_points(query_vector, limit=5):
    return client.search(collection_name=COLLECTION_NAME, query_vector=query_vector, limit=limit)


if __name__ == '__main__':
    create_collection()
    print('Qdrant client ready')
"#
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::entities::configuration::Configuration;
    use crate::domain::generator::generate_structure;
    use crate::domain::value_objects::ProjectName;

    #[test]
    fn each_database_gets_its_file() {
        let config = Configuration::new(ProjectName::new("db").unwrap()).with(
            Category::Database,
            ["postgresql", "mongodb", "redis", "pinecone", "chroma", "weaviate", "qdrant"],
        );
        let tree = generate_structure(&Catalog::builtin(), &config);
        let db = tree.root().dir("database").unwrap();
        assert_eq!(db.names().collect::<Vec<_>>(), ["schema.sql", "models", "redis.js", "vector"]);
        assert_eq!(
            db.dir("vector").unwrap().names().collect::<Vec<_>>(),
            ["pinecone_client.py", "chroma_client.py", "weaviate_client.py", "qdrant_client.py"]
        );
        let reqs = tree.root().file("requirements.txt").unwrap();
        assert!(reqs.contains("weaviate-client>=3.26,<4\n"));
        assert!(reqs.contains("chromadb\n"));
    }

    #[test]
    fn redis_does_not_read_undeclared_env() {
        let (_, content) = redis();
        assert!(!content.contains("process.env"));
    }

    #[test]
    fn vector_clients_read_registered_keys() {
        assert!(pinecone().1.contains("os.getenv('PINECONE_API_KEY')"));
        assert!(qdrant().1.contains("os.getenv('QDRANT_URL'"));
        assert_eq!(client_module("chroma"), "database.vector.chroma_client");
    }

    #[test]
    fn registered_emitters_are_catalog_databases() {
        let catalog = Catalog::builtin();
        for (id, _) in DATABASE_EMITTERS {
            assert!(catalog.option(Category::Database, id).is_some(), "{id}");
        }
    }
}
