//! Database repository for users, posts and contact messages.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::errors::AppError;
use crate::i18n::Language;
use crate::models::{
    ContactForm, ContactMessage, CreatePostRequest, CreateUserRequest, Post, PostStatus,
    PostTranslation, PostWithTranslations, UpsertTranslationRequest, User,
};

const POST_COLUMNS: &str = "p.id, p.slug, p.status, p.featured, p.banner, p.read_time_minutes, \
     p.published_at, p.author_id, p.created_at, p.updated_at";

const TRANSLATION_COLUMNS: &str = "post_id, language, title, abstract, content, localized_slug, \
     meta_title, meta_description";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// Create a user. A duplicate email is rejected by the unique index.
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let email = request.email.trim().to_lowercase();

        sqlx::query("INSERT INTO users (id, email, name, role, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&id)
            .bind(&email)
            .bind(&request.name)
            .bind(&request.role)
            .bind(&now)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id,
            email,
            name: request.name.clone(),
            role: request.role.clone(),
            created_at: now,
        })
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, email, name, role, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| User {
            id: row.get("id"),
            email: row.get("email"),
            name: row.get("name"),
            role: row.get("role"),
            created_at: row.get("created_at"),
        }))
    }

    // ==================== POST OPERATIONS ====================

    /// Create a new post without translations.
    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, AppError> {
        if self.get_user(&request.author_id).await?.is_none() {
            return Err(AppError::Validation(format!(
                "Author {} does not exist",
                request.author_id
            )));
        }
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let published_at = match (&request.published_at, request.status) {
            (Some(at), _) => Some(at.clone()),
            (None, PostStatus::Published) => Some(now.clone()),
            (None, _) => None,
        };

        // The insert takes the write lock before the slug check reads, so
        // concurrent writers are serialized. Canonical slugs are also UNIQUE.
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO posts (id, slug, status, featured, banner, read_time_minutes, published_at, author_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&request.slug)
        .bind(request.status.as_str())
        .bind(request.featured as i32)
        .bind(&request.banner)
        .bind(request.read_time_minutes)
        .bind(&published_at)
        .bind(&request.author_id)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await?;

        ensure_slug_free(&mut *tx, &request.slug, &id).await?;
        tx.commit().await?;

        Ok(Post {
            id,
            slug: request.slug.clone(),
            status: request.status,
            featured: request.featured,
            banner: request.banner.clone(),
            read_time_minutes: request.read_time_minutes,
            published_at,
            author_id: request.author_id.clone(),
            created_at: now.clone(),
            updated_at: now,
        })
    }

    /// Get a post by ID, whatever its status.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM posts p WHERE p.id = ?", POST_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(post_from_row).transpose()
    }

    /// Find a published post by canonical slug, or by its localized slug in `language`.
    ///
    /// The default language's localized slug also matches, since that
    /// translation is served when `language` has none.
    pub async fn find_published_post(
        &self,
        url_slug: &str,
        language: Language,
    ) -> Result<Option<Post>, AppError> {
        // Canonical slug matches take precedence over localized ones.
        let row = sqlx::query(&format!(
            r#"
            SELECT {} FROM posts p
            WHERE p.status = 'published'
              AND (p.slug = ?1 OR EXISTS (
                  SELECT 1 FROM post_translations t
                  WHERE t.post_id = p.id
                    AND t.localized_slug = ?1
                    AND t.language IN (?2, ?3)))
            ORDER BY CASE WHEN p.slug = ?1 THEN 0 ELSE 1 END
            LIMIT 1
            "#,
            POST_COLUMNS
        ))
        .bind(url_slug)
        .bind(language.code())
        .bind(Language::DEFAULT.code())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(post_from_row).transpose()
    }

    /// List every post with its translations, newest first. Used by the admin API.
    pub async fn list_posts(&self) -> Result<Vec<PostWithTranslations>, AppError> {
        self.list_posts_where("1 = 1").await
    }

    /// List published posts with their translations, newest first.
    pub async fn list_published_posts(&self) -> Result<Vec<PostWithTranslations>, AppError> {
        self.list_posts_where("p.status = 'published'").await
    }

    async fn list_posts_where(&self, filter: &str) -> Result<Vec<PostWithTranslations>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM posts p WHERE {} ORDER BY p.featured DESC, p.published_at DESC, p.created_at DESC",
            POST_COLUMNS, filter
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            let post = post_from_row(row)?;
            let translations = self.list_translations(&post.id).await?;
            posts.push(PostWithTranslations { post, translations });
        }
        Ok(posts)
    }

    /// All translations of a post.
    pub async fn list_translations(&self, post_id: &str) -> Result<Vec<PostTranslation>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM post_translations WHERE post_id = ? ORDER BY language",
            TRANSLATION_COLUMNS
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        // Rows in a language the site no longer serves are skipped.
        Ok(rows.iter().filter_map(translation_from_row).collect())
    }

    /// Create or replace the translation of a post for one language.
    pub async fn upsert_translation(
        &self,
        post_id: &str,
        language: Language,
        request: &UpsertTranslationRequest,
    ) -> Result<PostTranslation, AppError> {
        let post = self
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        // Write first so the slug check runs under the write lock.
        sqlx::query("UPDATE posts SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(&post.id)
            .execute(&mut *tx)
            .await?;

        if let Some(localized) = &request.localized_slug {
            ensure_slug_free(&mut *tx, localized, &post.id).await?;
        }

        sqlx::query(
            r#"
            INSERT INTO post_translations
                (id, post_id, language, title, abstract, content, localized_slug, meta_title, meta_description)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (post_id, language) DO UPDATE SET
                title = excluded.title,
                abstract = excluded.abstract,
                content = excluded.content,
                localized_slug = excluded.localized_slug,
                meta_title = excluded.meta_title,
                meta_description = excluded.meta_description
            "#,
        )
        .bind(uuid::Uuid::new_v4().to_string())
        .bind(post_id)
        .bind(language.code())
        .bind(&request.title)
        .bind(&request.abstract_text)
        .bind(&request.content)
        .bind(&request.localized_slug)
        .bind(&request.meta_title)
        .bind(&request.meta_description)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(PostTranslation {
            post_id: post_id.to_string(),
            language,
            title: request.title.clone(),
            abstract_text: request.abstract_text.clone(),
            content: request.content.clone(),
            localized_slug: request.localized_slug.clone(),
            meta_title: request.meta_title.clone(),
            meta_description: request.meta_description.clone(),
        })
    }

    // ==================== CONTACT OPERATIONS ====================

    /// Store a validated contact form submission.
    pub async fn create_contact_message(
        &self,
        form: &ContactForm,
    ) -> Result<ContactMessage, AppError> {
        let message = ContactMessage {
            id: uuid::Uuid::new_v4().to_string(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            message: form.message.trim().to_string(),
            created_at: Utc::now().to_rfc3339(),
        };

        sqlx::query(
            "INSERT INTO contact_messages (id, name, email, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&message.id)
        .bind(&message.name)
        .bind(&message.email)
        .bind(&message.message)
        .bind(&message.created_at)
        .execute(&self.pool)
        .await?;

        Ok(message)
    }

    /// List contact messages, newest first.
    pub async fn list_contact_messages(&self) -> Result<Vec<ContactMessage>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, created_at FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| ContactMessage {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                message: row.get("message"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}

/// Reject a slug already used by another post, canonically or localized.
///
/// Runs on the caller's transaction, after it has written.
async fn ensure_slug_free(
    conn: &mut SqliteConnection,
    slug: &str,
    own_post_id: &str,
) -> Result<(), AppError> {
    let taken: i64 = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM posts WHERE slug = ?1 AND id != ?2)
          + (SELECT COUNT(*) FROM post_translations
             WHERE localized_slug = ?1 AND post_id != ?2) AS taken
        "#,
    )
    .bind(slug)
    .bind(own_post_id)
    .fetch_one(&mut *conn)
    .await?
    .get("taken");

    if taken > 0 {
        return Err(AppError::Conflict(format!("Slug {} is already in use", slug)));
    }
    Ok(())
}

// Helper functions for row conversion

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Post, AppError> {
    let status: String = row.get("status");
    let featured: i32 = row.get("featured");
    Ok(Post {
        id: row.get("id"),
        slug: row.get("slug"),
        status: PostStatus::parse(&status)
            .ok_or_else(|| AppError::Database(format!("Unknown post status {}", status)))?,
        featured: featured != 0,
        banner: row.get("banner"),
        read_time_minutes: row.get("read_time_minutes"),
        published_at: row.get("published_at"),
        author_id: row.get("author_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn translation_from_row(row: &sqlx::sqlite::SqliteRow) -> Option<PostTranslation> {
    let language: String = row.get("language");
    Some(PostTranslation {
        post_id: row.get("post_id"),
        language: Language::parse(&language)?,
        title: row.get("title"),
        abstract_text: row.get("abstract"),
        content: row.get("content"),
        localized_slug: row.get("localized_slug"),
        meta_title: row.get("meta_title"),
        meta_description: row.get("meta_description"),
    })
}
