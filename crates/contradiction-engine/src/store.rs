//! In-memory persistence, for tests and embedding without a database.

use std::collections::BTreeMap;

use doccheck_types::{
    ClauseType, ClauseValue, Contradiction, DocumentStore, ParsedDocument,
};

struct StoredDocument {
    document: ParsedDocument,
    raw_text: String,
}

/// A `DocumentStore` backed by vectors.
#[derive(Default)]
pub struct MemoryStore {
    documents: Vec<StoredDocument>,
    contradictions: Vec<Contradiction>,
    next_doc_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw extracted text of a stored document, if present.
    pub fn raw_text(&self, doc_id: i64) -> Option<&str> {
        self.documents
            .iter()
            .find(|stored| stored.document.doc_id == Some(doc_id))
            .map(|stored| stored.raw_text.as_str())
    }
}

impl DocumentStore for MemoryStore {
    fn store_document(
        &mut self,
        filename: &str,
        file_path: &str,
        raw_text: &str,
        clauses: &BTreeMap<ClauseType, ClauseValue>,
    ) -> anyhow::Result<i64> {
        self.next_doc_id += 1;
        let doc_id = self.next_doc_id;

        let mut document = ParsedDocument::success(filename, file_path, clauses.clone());
        document.doc_id = Some(doc_id);

        self.documents.push(StoredDocument {
            document,
            raw_text: raw_text.to_string(),
        });
        Ok(doc_id)
    }

    fn store_contradiction(&mut self, contradiction: &Contradiction) -> anyhow::Result<i64> {
        self.contradictions.push(contradiction.clone());
        Ok(self.contradictions.len() as i64)
    }

    fn list_documents(&self) -> anyhow::Result<Vec<ParsedDocument>> {
        Ok(self
            .documents
            .iter()
            .map(|stored| stored.document.clone())
            .collect())
    }

    fn list_contradictions(&self) -> anyhow::Result<Vec<Contradiction>> {
        Ok(self.contradictions.clone())
    }

    fn delete_document(&mut self, doc_id: i64) -> anyhow::Result<bool> {
        let before = self.documents.len();
        self.documents
            .retain(|stored| stored.document.doc_id != Some(doc_id));
        Ok(self.documents.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_list_documents() {
        let mut store = MemoryStore::new();
        let clauses: BTreeMap<ClauseType, ClauseValue> =
            [(ClauseType::Salary, ClauseValue::text("$75,000"))].into();

        let id1 = store
            .store_document("a.pdf", "/docs/a.pdf", "raw text", &clauses)
            .unwrap();
        let id2 = store
            .store_document("b.pdf", "/docs/b.pdf", "raw text", &clauses)
            .unwrap();
        assert_eq!((id1, id2), (1, 2));

        let documents = store.list_documents().unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].doc_id, Some(1));
        assert_eq!(documents[0].filename, "a.pdf");
    }

    #[test]
    fn test_delete_document() {
        let mut store = MemoryStore::new();
        let clauses = BTreeMap::new();
        let id = store
            .store_document("a.pdf", "/docs/a.pdf", "text", &clauses)
            .unwrap();

        assert!(store.delete_document(id).unwrap());
        assert!(!store.delete_document(id).unwrap());
        assert!(store.list_documents().unwrap().is_empty());
    }
}
