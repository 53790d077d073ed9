//! Tantivy-based search index module.
//!
//! Indexes one document per published post translation, with field boosting
//! and a per-language filter. A default-language document also serves every
//! language the post has no translation for, matching the page fallback.

use std::path::Path;
use std::sync::Arc;
use tantivy::collector::{Count, TopDocs};
use tantivy::query::{BooleanQuery, BoostQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{Field, IndexRecordOption, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexReader, IndexWriter, ReloadPolicy, TantivyDocument, Term};
use tokio::sync::RwLock;

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::{PostStatus, PostWithTranslations};

/// Field boost values.
const BOOST_TITLE: f32 = 10.0;
const BOOST_ABSTRACT: f32 = 6.0;
const BOOST_CONTENT: f32 = 3.0;

/// Deepest result offset a query may page to.
pub const MAX_OFFSET: usize = 10_000;

/// Search hit for one translation of a post.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub post_id: String,
    pub language: Language,
    pub slug: String,
    pub title: String,
    pub score: f32,
}

/// One page of hits plus the number of matching documents.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub hits: Vec<SearchResult>,
    pub total: usize,
}

/// Search index schema fields.
struct SearchFields {
    post_id: Field,
    language: Field,
    /// Languages this document is shown for
    serves: Field,
    slug: Field,
    title: Field,
    abstract_text: Field,
    content: Field,
}

/// Tantivy search index for published posts.
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
        let post_id = schema_builder.add_text_field("post_id", STRING | STORED);
        let language = schema_builder.add_text_field("language", STRING | STORED);
        let serves = schema_builder.add_text_field("serves", STRING);
        let slug = schema_builder.add_text_field("slug", STORED);
        let title = schema_builder.add_text_field("title", TEXT | STORED);
        let abstract_text = schema_builder.add_text_field("abstract", TEXT);
        let content = schema_builder.add_text_field("content", TEXT);
        let schema = schema_builder.build();

        let fields = SearchFields {
            post_id,
            language,
            serves,
            slug,
            title,
            abstract_text,
            content,
        };

        // Try to open existing index or create new one
        let index = match Index::open_in_dir(index_path) {
            Ok(existing) if existing.schema().get_field("serves").is_ok() => existing,
            Ok(stale) => {
                // Built by an older schema; the startup rebuild refills it.
                drop(stale);
                tracing::warn!("Search index schema is outdated, recreating {:?}", index_path);
                std::fs::remove_dir_all(index_path)?;
                std::fs::create_dir_all(index_path)?;
                Index::create_in_dir(index_path, schema)
                    .map_err(|e| AppError::Search(format!("Failed to create index: {}", e)))?
            }
            Err(_) => Index::create_in_dir(index_path, schema)
                .map_err(|e| AppError::Search(format!("Failed to open/create index: {}", e)))?,
        };

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

    /// Rebuild the entire index from published posts.
    pub async fn rebuild(&self, posts: &[PostWithTranslations]) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_all_documents()?;

        let mut count = 0;
        for entry in posts.iter().filter(|p| p.post.status == PostStatus::Published) {
            for doc in self.create_documents(entry) {
                writer.add_document(doc)?;
                count += 1;
            }
        }

        writer.commit()?;
        self.reader.reload()?;

        tracing::info!("Search index rebuilt with {} translations", count);
        Ok(())
    }

    /// Re-index every translation of one post. Unpublished posts are removed.
    pub async fn index_post(&self, entry: &PostWithTranslations) -> Result<(), AppError> {
        let mut writer = self.writer.write().await;

        writer.delete_term(Term::from_field_text(self.fields.post_id, &entry.post.id));
        if entry.post.status == PostStatus::Published {
            for doc in self.create_documents(entry) {
                writer.add_document(doc)?;
            }
        }
        writer.commit()?;

        self.reader.reload()?;

        Ok(())
    }

    /// Search posts shown in `language` matching the query.
    ///
    /// `offset` is capped at [`MAX_OFFSET`]. A zero `limit` only counts.
    pub fn search(
        &self,
        query_str: &str,
        language: Language,
        limit: usize,
        offset: usize,
    ) -> Result<SearchPage, AppError> {
        if query_str.trim().is_empty() {
            return Ok(SearchPage::default());
        }
        let offset = offset.min(MAX_OFFSET);

        let searcher = self.reader.searcher();

        // Validate the query against all text fields first so syntax errors surface.
        QueryParser::for_index(
            &self.index,
            vec![self.fields.title, self.fields.abstract_text, self.fields.content],
        )
        .parse_query(query_str)
        .map_err(|e| AppError::BadRequest(format!("Invalid search query: {}", e)))?;

        let mut text_queries: Vec<(Occur, Box<dyn Query>)> = Vec::new();
        let field_queries = [
            (self.fields.title, BOOST_TITLE),
            (self.fields.abstract_text, BOOST_ABSTRACT),
            (self.fields.content, BOOST_CONTENT),
        ];
        for (field, boost) in field_queries {
            let field_parser = QueryParser::for_index(&self.index, vec![field]);
            if let Ok(field_query) = field_parser.parse_query(query_str) {
                text_queries.push((Occur::Should, Box::new(BoostQuery::new(field_query, boost))));
            }
        }

        let language_filter = TermQuery::new(
            Term::from_field_text(self.fields.serves, language.code()),
            IndexRecordOption::Basic,
        );
        let combined = BooleanQuery::new(vec![
            (Occur::Must, Box::new(BooleanQuery::new(text_queries)) as Box<dyn Query>),
            (Occur::Must, Box::new(language_filter)),
        ]);

        if limit == 0 {
            let total = searcher
                .search(&combined, &Count)
                .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;
            return Ok(SearchPage {
                hits: Vec::new(),
                total,
            });
        }

        let (total, top_docs) = searcher
            .search(
                &combined,
                &(Count, TopDocs::with_limit(limit).and_offset(offset)),
            )
            .map_err(|e| AppError::Search(format!("Search failed: {}", e)))?;

        let hits = top_docs
            .into_iter()
            .filter_map(|(score, doc_address)| {
                let doc: TantivyDocument = searcher.doc(doc_address).ok()?;
                let text = |field: Field| -> Option<String> {
                    Some(doc.get_first(field)?.as_str()?.to_string())
                };
                Some(SearchResult {
                    post_id: text(self.fields.post_id)?,
                    language: Language::parse(&text(self.fields.language)?)?,
                    slug: text(self.fields.slug)?,
                    title: text(self.fields.title)?,
                    score,
                })
            })
            .collect();

        Ok(SearchPage { hits, total })
    }

    /// One Tantivy document per translation of a post.
    fn create_documents(&self, entry: &PostWithTranslations) -> Vec<TantivyDocument> {
        let untranslated: Vec<Language> = Language::ALL
            .iter()
            .copied()
            .filter(|&lang| !entry.translations.iter().any(|t| t.language == lang))
            .collect();

        entry
            .translations
            .iter()
            .map(|t| {
                let mut document = doc!(
                    self.fields.post_id => entry.post.id.clone(),
                    self.fields.language => t.language.code(),
                    self.fields.serves => t.language.code(),
                    self.fields.slug => t.effective_slug(&entry.post).to_string(),
                    self.fields.title => t.title.clone(),
                    self.fields.abstract_text => t.abstract_text.clone(),
                    self.fields.content => t.content.clone()
                );
                if t.language == Language::DEFAULT {
                    for lang in &untranslated {
                        document.add_text(self.fields.serves, lang.code());
                    }
                }
                document
            })
            .collect()
    }
}
