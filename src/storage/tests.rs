//! Storage Module Tests
//!
//! Validates collection mechanics, the connection lifecycle and transaction rollback.
//!
//! ## Test Scopes
//! - **Collection**: Insert/save/find semantics, ordering and validation.
//! - **Connection**: URI handling, closing, dropping the database.
//! - **Transaction**: Commit keeps writes, dropping undoes them in reverse.

#[cfg(test)]
mod tests {
    use crate::storage::{Connection, Document, DocumentId, StorageError, Transaction};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: DocumentId,
        text: String,
    }

    impl Note {
        fn new(text: &str) -> Self {
            Self {
                id: DocumentId::new(),
                text: text.to_string(),
            }
        }
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";

        fn id(&self) -> &DocumentId {
            &self.id
        }

        fn validate(&self) -> Result<(), String> {
            if self.text.trim().is_empty() {
                return Err("text is required".to_string());
            }
            Ok(())
        }
    }

    fn open() -> std::sync::Arc<Connection> {
        Connection::open("memory://storage-tests").unwrap()
    }

    // ============================================================
    // COLLECTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_insert_and_find_by_id() {
        let conn = open();
        let notes = conn.collection::<Note>();

        let note = notes.insert(Note::new("ụlọ")).await.unwrap();
        let found = notes.find_by_id(&note.id).await.unwrap();

        assert_eq!(found, Some(note));
        assert_eq!(notes.count(), 1);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id() {
        let conn = open();
        let notes = conn.collection::<Note>();
        let note = Note::new("first");

        notes.insert(note.clone()).await.unwrap();
        let err = notes.insert(note).await.unwrap_err();

        assert!(matches!(err, StorageError::Duplicate { .. }));
    }

    #[tokio::test]
    async fn test_insert_validates_document() {
        let conn = open();
        let notes = conn.collection::<Note>();

        let err = notes.insert(Note::new("   ")).await.unwrap_err();

        assert!(matches!(
            err,
            StorageError::Validation {
                collection: "notes",
                ..
            }
        ));
        assert_eq!(notes.count(), 0);
    }

    #[tokio::test]
    async fn test_find_keeps_insertion_order() {
        let conn = open();
        let notes = conn.collection::<Note>();

        for text in ["one", "two", "three", "four"] {
            notes.insert(Note::new(text)).await.unwrap();
        }

        let texts: Vec<String> = notes
            .find(|_| true)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three", "four"]);
    }

    #[tokio::test]
    async fn test_save_keeps_position_and_returns_previous() {
        let conn = open();
        let notes = conn.collection::<Note>();
        let first = notes.insert(Note::new("first")).await.unwrap();
        notes.insert(Note::new("second")).await.unwrap();

        let mut edited = first.clone();
        edited.text = "edited".to_string();
        let previous = notes.save(edited).await.unwrap();

        assert_eq!(previous.text, "first");
        let all = notes.find(|_| true).await.unwrap();
        assert_eq!(all[0].text, "edited");
        assert_eq!(all[1].text, "second");
    }

    #[tokio::test]
    async fn test_save_unknown_document_fails() {
        let conn = open();
        let notes = conn.collection::<Note>();

        let err = notes.save(Note::new("ghost")).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_many_preserves_id_order_and_skips_missing() {
        let conn = open();
        let notes = conn.collection::<Note>();
        let a = notes.insert(Note::new("a")).await.unwrap();
        let b = notes.insert(Note::new("b")).await.unwrap();

        let ids = vec![b.id.clone(), DocumentId::new(), a.id.clone()];
        let found = notes.find_many(&ids).await.unwrap();

        assert_eq!(found, vec![b, a]);
    }

    // ============================================================
    // CONNECTION TESTS
    // ============================================================

    #[test]
    fn test_open_rejects_unknown_scheme() {
        let err = Connection::open("mongodb://localhost/igbo").err().unwrap();
        assert!(matches!(err, StorageError::UnsupportedUri { .. }));
        assert!(Connection::open("memory://").is_err());
    }

    #[tokio::test]
    async fn test_collection_handle_is_shared() {
        let conn = open();
        conn.collection::<Note>()
            .insert(Note::new("shared"))
            .await
            .unwrap();

        assert_eq!(conn.collection::<Note>().count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_callers_share_one_collection() {
        let conn = open();

        let tasks = (0..16).map(|i| {
            let conn = conn.clone();
            tokio::spawn(async move {
                let notes = conn.collection::<Note>();
                notes.insert(Note::new(&format!("note {i}"))).await.unwrap();
                notes
            })
        });
        let collections = futures::future::try_join_all(tasks).await.unwrap();

        assert!(
            collections
                .iter()
                .all(|notes| std::sync::Arc::ptr_eq(notes, &collections[0]))
        );
        assert_eq!(conn.collection::<Note>().count(), 16);
    }

    #[tokio::test]
    async fn test_closed_connection_rejects_operations() {
        let conn = open();
        let notes = conn.collection::<Note>();
        conn.close();

        assert!(!conn.is_open());
        let err = notes.insert(Note::new("late")).await.unwrap_err();
        assert!(matches!(err, StorageError::Closed { .. }));
        assert!(notes.find(|_| true).await.is_err());
        assert!(conn.drop_database().is_err());
    }

    #[tokio::test]
    async fn test_drop_database_clears_every_collection() {
        let conn = open();
        let notes = conn.collection::<Note>();
        notes.insert(Note::new("a")).await.unwrap();
        notes.insert(Note::new("b")).await.unwrap();

        assert_eq!(conn.drop_database().unwrap(), 2);
        assert_eq!(notes.count(), 0);
    }

    // ============================================================
    // TRANSACTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_committed_transaction_keeps_writes() {
        let conn = open();
        let notes = conn.collection::<Note>();

        let tx = Transaction::begin("commit");
        tx.insert(&notes, Note::new("kept")).await.unwrap();
        assert_eq!(tx.pending_writes(), 1);
        tx.commit();

        assert_eq!(notes.count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_transaction_undoes_inserts() {
        let conn = open();
        let notes = conn.collection::<Note>();

        {
            let tx = Transaction::begin("dropped");
            tx.insert(&notes, Note::new("a")).await.unwrap();
            tx.insert(&notes, Note::new("b")).await.unwrap();
            assert_eq!(notes.count(), 2);
        }

        assert_eq!(notes.count(), 0);
    }

    #[tokio::test]
    async fn test_rollback_restores_saved_documents() {
        let conn = open();
        let notes = conn.collection::<Note>();
        let original = notes.insert(Note::new("original")).await.unwrap();

        let tx = Transaction::begin("rollback");
        let mut edited = original.clone();
        edited.text = "edited".to_string();
        tx.save(&notes, edited).await.unwrap();
        tx.insert(&notes, Note::new("extra")).await.unwrap();
        drop(tx);

        let all = notes.find(|_| true).await.unwrap();
        assert_eq!(all, vec![original]);
    }

    #[tokio::test]
    async fn test_failed_write_is_not_recorded() {
        let conn = open();
        let notes = conn.collection::<Note>();

        let tx = Transaction::begin("failed");
        tx.insert(&notes, Note::new("ok")).await.unwrap();
        assert!(tx.insert(&notes, Note::new("")).await.is_err());
        assert_eq!(tx.pending_writes(), 1);
    }
}
