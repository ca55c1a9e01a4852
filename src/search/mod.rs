//! Tantivy-based search index module.
//!
//! One index holds documents for every entity type; each search is restricted to a
//! single type and matches its primary text with a higher boost than related text.

use std::path::Path;
use std::sync::Arc;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, INDEXED, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::models::{EntityKind, Ingredient, Recipe, Step, Technique};

/// Field boost values.
const BOOST_PRIMARY: f32 = 10.0;
const BOOST_RELATED: f32 = 4.0;

/// Maximum number of hits returned by a search.
pub const MAX_RESULTS: usize = 1000;

/// Search hit with entity id and relevance score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: i64,
    pub score: f32,
}

/// Text extracted from an entity for indexing.
#[derive(Debug, Clone)]
pub struct SearchDocument {
    pub kind: EntityKind,
    pub id: i64,
    /// The entity's own text: name, action or description.
    pub primary: String,
    /// Text borrowed from related entities and enum labels.
    pub related: String,
}

impl From<&Ingredient> for SearchDocument {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            kind: EntityKind::Ingredient,
            id: ingredient.id.unwrap_or_default(),
            primary: ingredient.name.clone().unwrap_or_default(),
            related: String::new(),
        }
    }
}

impl From<&Recipe> for SearchDocument {
    fn from(recipe: &Recipe) -> Self {
        let mut related: Vec<String> = Vec::new();
        if let Some(cooking) = recipe.cooking {
            related.push(cooking.as_str().to_string());
        }
        related.extend(recipe.ingredients.iter().flatten().filter_map(|i| i.name.clone()));
        related.extend(recipe.steps.iter().flatten().filter_map(|s| s.action.clone()));

        Self {
            kind: EntityKind::Recipe,
            id: recipe.id.unwrap_or_default(),
            primary: recipe.name.clone().unwrap_or_default(),
            related: related.join(" "),
        }
    }
}

impl From<&Step> for SearchDocument {
    fn from(step: &Step) -> Self {
        Self {
            kind: EntityKind::Step,
            id: step.id.unwrap_or_default(),
            primary: step.action.clone().unwrap_or_default(),
            related: String::new(),
        }
    }
}

impl From<&Technique> for SearchDocument {
    fn from(technique: &Technique) -> Self {
        Self {
            kind: EntityKind::Technique,
            id: technique.id.unwrap_or_default(),
            primary: technique.description.clone().unwrap_or_default(),
            related: String::new(),
        }
    }
}

/// Search index schema fields.
struct SearchFields {
    kind: Field,
    entity_id: Field,
    doc_key: Field,
    primary: Field,
    related: Field,
}

/// Tantivy search index for all entities.
pub struct SearchIndex {
    index: Index,
    reader: IndexReader,
    writer: Arc<RwLock<IndexWriter>>,
    fields: SearchFields,
}

impl SearchIndex {
    /// Create or open a search index at the specified path.
    pub fn open(index_path: &Path) -> Result<Self, AppError> {
        std::fs::create_dir_all(index_path)
            .map_err(|e| AppError::Search(format!("Failed to create index directory: {}", e)))?;

        let mut schema_builder = Schema::builder();
        let kind = schema_builder.add_text_field("kind", STRING | STORED);
        let entity_id = schema_builder.add_i64_field("entity_id", INDEXED | STORED);
        let doc_key = schema_builder.add_text_field("doc_key", STRING);
        let primary = schema_builder.add_text_field("primary", TEXT);
        let related = schema_builder.add_text_field("related", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            kind,
            entity_id,
            doc_key,
            primary,
            related,
        };

        // Try to open existing index or create new one
        let index = Index::open_in_dir(index_path)
            .or_else(|_| Index::create_in_dir(index_path, schema.clone()))
            .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?;

        let reader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::OnCommitWithDelay)
            .try_into()
            .map_err(|e| AppError::Search(format!("Failed to create reader: {}", e)))?;

        let writer = index
            .writer(50_000_000) // 50MB buffer
            .map_err(|e| AppError::Search(format!("Failed to create writer: {}", e)))?;

        Ok(Self {
            index,
            reader,
            writer: Arc::new(RwLock::new(writer)),
            fields,
        })
    }

    /// Rebuild the entire index from the given documents.
    pub async fn rebuild(&self, documents: &[SearchDocument]) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_all_documents()?;
        for document in documents {
            writer.add_document(self.create_document(document))?;
        }
        writer.commit()?;

        self.reader.reload()?;

        tracing::info!("Search index rebuilt with {} documents", documents.len());
        Ok(())
    }

    /// Index a single entity, replacing any previous version.
    pub async fn index(&self, document: SearchDocument) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_term(self.key_term(document.kind, document.id));
        writer.add_document(self.create_document(&document))?;
        writer.commit()?;

        self.reader.reload()?;

        Ok(())
    }

    /// Remove an entity from the index.
    pub async fn remove(&self, kind: EntityKind, id: i64) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_term(self.key_term(kind, id));
        writer.commit()?;

        self.reader.reload()?;

        Ok(())
    }

    /// Search one entity type, best matches first.
    pub fn search(
        &self,
        kind: EntityKind,
        query_str: &str,
        limit: usize,
    ) -> Result<Vec<SearchResult>, AppError> {
        if query_str.trim().is_empty() {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();

        let mut text_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        for (field, boost) in [
            (self.fields.primary, BOOST_PRIMARY),
            (self.fields.related, BOOST_RELATED),
        ] {
            let parser = QueryParser::for_index(&self.index, vec![field]);
            let parsed = parser
                .parse_query(query_str)
                .map_err(|e| AppError::BadRequest(format!("Invalid search query: {}", e)))?;
            text_queries.push((Occur::Should, Box::new(BoostQuery::new(parsed, boost))));
        }

        let kind_query = TermQuery::new(
            Term::from_field_text(self.fields.kind, kind.as_str()),
            IndexRecordOption::Basic,
        );

        let combined = BooleanQuery::new(vec![
            (Occur::Must, Box::new(kind_query) as Box<dyn Query>),
            (
                Occur::Must,
                Box::new(BooleanQuery::new(text_queries)) as Box<dyn Query>,
            ),
        ]);

        let top_docs = searcher
            .search(&combined, &TopDocs::with_limit(limit.clamp(1, MAX_RESULTS)))
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        let results = top_docs
            .into_iter()
            .filter_map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                let id = doc.get_first(self.fields.entity_id)?.as_i64()?;
                Some(SearchResult { id, score })
            })
            .collect();

        Ok(results)
    }

    fn key_term(&self, kind: EntityKind, id: i64) -> Term {
        Term::from_field_text(self.fields.doc_key, &format!("{}:{}", kind, id))
    }

    fn create_document(&self, document: &SearchDocument) -> TantivyDocument {
        doc!(
            self.fields.kind => document.kind.as_str().to_string(),
            self.fields.entity_id => document.id,
            self.fields.doc_key => format!("{}:{}", document.kind, document.id),
            self.fields.primary => document.primary.clone(),
            self.fields.related => document.related.clone()
        )
    }
}
