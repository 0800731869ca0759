//! Wish service.

use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;
use wishboard_common::{AppResult, IdGenerator};
use wishboard_db::{
    entities::{Job, WishStatus, wish},
    repositories::{SortOrder, WishFilter, WishRepository, WishSortKey},
};

use crate::cache::WishListCache;
use crate::policy::{
    Actor, PageRequest, WishFacts, WishOperation, authorize, effective_status_filter,
    initial_status, require_authenticated, total_pages,
};

/// Wish service for business logic.
#[derive(Clone)]
pub struct WishService {
    wish_repo: WishRepository,
    cache: WishListCache,
    id_gen: IdGenerator,
}

/// Input for creating a wish.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    pub job: Job,

    /// Display name to file the wish under. Defaults to the creator's name.
    #[validate(length(min = 1, max = 100))]
    pub submitter: Option<String>,

    /// Only honoured for admins asking for `published`.
    pub status: Option<WishStatus>,
}

/// Input for editing a wish. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWishInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,

    pub job: Option<Job>,

    #[validate(length(min = 1, max = 100))]
    pub submitter: Option<String>,
}

/// Listing query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWishesQuery {
    pub status: Option<WishStatus>,
    pub job: Option<Job>,
    pub submitter_id: Option<String>,
    /// Keyword matched against title and description.
    pub q: Option<String>,
    #[serde(default)]
    pub sort_by: WishSortKey,
    #[serde(default)]
    pub order: SortOrder,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

/// One page of wishes.
#[derive(Debug, Clone)]
pub struct WishPage {
    pub items: Vec<wish::Model>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

impl WishService {
    /// Create a new wish service.
    #[must_use]
    pub const fn new(wish_repo: WishRepository, cache: WishListCache) -> Self {
        Self {
            wish_repo,
            cache,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a wish owned by `actor`.
    ///
    /// Non-admins always get a draft whatever status they asked for.
    pub async fn create(
        &self,
        actor: &Actor,
        display_name: &str,
        input: CreateWishInput,
    ) -> AppResult<wish::Model> {
        require_authenticated(actor).check("wishes")?;
        input.validate()?;

        let now = Utc::now();
        let model = wish::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            job: Set(input.job),
            submitter: Set(input
                .submitter
                .unwrap_or_else(|| display_name.to_string())),
            submitter_id: Set(actor.id().map(ToString::to_string)),
            status: Set(initial_status(actor, input.status)),
            likes: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let wish = self.wish_repo.create(model).await?;
        self.cache.invalidate_all().await;

        tracing::info!(wish_id = %wish.id, status = wish.status.as_str(), "Wish created");
        Ok(wish)
    }

    /// Get a wish the actor may read.
    pub async fn get(&self, actor: &Actor, id: &str) -> AppResult<wish::Model> {
        let wish = self.wish_repo.get_by_id(id).await?;
        self.check(WishOperation::Read, &wish, actor)?;
        Ok(wish)
    }

    /// List wishes visible to `actor`.
    pub async fn list(&self, actor: &Actor, query: ListWishesQuery) -> AppResult<WishPage> {
        let predicate = effective_status_filter(actor, query.status, query.submitter_id.as_deref());
        let keyword = query
            .q
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty());

        let filter = WishFilter {
            status: predicate.as_status(),
            job: query.job,
            submitter_id: query.submitter_id,
            keyword,
            sort_key: query.sort_by,
            order: query.order,
        };
        let page = PageRequest::new(query.page, query.page_size);
        let key = (filter, page);

        if let Some(cached) = self.cache.get(&key).await {
            return Ok(cached);
        }

        let generation = self.cache.generation().await;
        let (items, total) = self
            .wish_repo
            .find_page(&key.0, page.page, page.page_size)
            .await?;

        let result = WishPage {
            items,
            total,
            page: page.page,
            page_size: page.page_size,
            total_pages: total_pages(total, page.page_size),
        };

        self.cache.insert(key, result.clone(), generation).await;
        Ok(result)
    }

    /// Edit a wish's fields.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        input: UpdateWishInput,
    ) -> AppResult<wish::Model> {
        input.validate()?;

        let wish = self.wish_repo.get_by_id(id).await?;
        self.check(WishOperation::Edit, &wish, actor)?;

        let mut active: wish::ActiveModel = wish.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(job) = input.job {
            active.job = Set(job);
        }
        if let Some(submitter) = input.submitter {
            active.submitter = Set(submitter);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = self.wish_repo.update(active).await?;
        self.cache.invalidate_all().await;

        tracing::info!(wish_id = %id, "Wish updated");
        Ok(updated)
    }

    /// Delete a wish.
    pub async fn delete(&self, actor: &Actor, id: &str) -> AppResult<()> {
        let wish = self.wish_repo.get_by_id(id).await?;
        self.check(WishOperation::Delete, &wish, actor)?;

        self.wish_repo.delete(id).await?;
        self.cache.invalidate_all().await;

        tracing::info!(wish_id = %id, "Wish deleted");
        Ok(())
    }

    /// Publish a draft.
    pub async fn publish(&self, actor: &Actor, id: &str) -> AppResult<wish::Model> {
        self.transition(actor, id, WishOperation::Publish, WishStatus::Published)
            .await
    }

    /// Archive a wish (admin only).
    pub async fn archive(&self, actor: &Actor, id: &str) -> AppResult<wish::Model> {
        self.transition(actor, id, WishOperation::Archive, WishStatus::Archived)
            .await
    }

    /// Drop cached listings after a change made elsewhere (likes).
    pub async fn invalidate_listings(&self) {
        self.cache.invalidate_all().await;
    }

    async fn transition(
        &self,
        actor: &Actor,
        id: &str,
        op: WishOperation,
        to: WishStatus,
    ) -> AppResult<wish::Model> {
        let wish = self.wish_repo.get_by_id(id).await?;
        self.check(op, &wish, actor)?;

        let from = wish.status;
        let mut active: wish::ActiveModel = wish.into();
        active.status = Set(to);
        active.updated_at = Set(Utc::now().into());

        let updated = self.wish_repo.update(active).await?;
        self.cache.invalidate_all().await;

        tracing::info!(
            wish_id = %id,
            from = from.as_str(),
            to = to.as_str(),
            "Wish status changed"
        );
        Ok(updated)
    }

    fn check(&self, op: WishOperation, wish: &wish::Model, actor: &Actor) -> AppResult<()> {
        authorize(op, WishFacts::from(wish), actor).check(&format!("wish {}", wish.id))
    }
}
