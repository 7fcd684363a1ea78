//! Food Editor
//!
//! Draft state behind the create/edit modal. The draft is seeded once per
//! modal session and is never re-synced from later snapshots while open.

use crate::backend::MenuBackend;
use crate::error::{AppResult, ValidationError};
use crate::format::new_id;
use crate::image::{EncodedImage, ImageSelection};
use crate::ingredients::IngredientEditor;
use crate::models::{Category, FoodItem, IngredientItem};

/// Identity of one modal session: a counter bumped on every open plus the
/// food being edited (None when creating).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftKey {
    pub session: u64,
    pub target: Option<String>,
}

/// Form-local copy of a food
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: Option<Category>,
    pub image: ImageSelection,
    pub ingredients: Vec<IngredientItem>,
    pub available: bool,
}

impl Default for FoodDraft {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: 0,
            category: None,
            image: ImageSelection::Empty,
            ingredients: Vec::new(),
            // New foods start on the menu
            available: true,
        }
    }
}

impl FoodDraft {
    pub fn from_item(item: &FoodItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: Some(item.category),
            image: ImageSelection::from_existing(&item.image),
            ingredients: item.ingredients.clone(),
            available: item.available,
        }
    }

    /// First broken rule, checked in form order
    pub fn validate(&self) -> Result<Category, ValidationError> {
        let category = self.category.ok_or(ValidationError::MissingCategory)?;
        if !self.image.is_present() {
            return Err(ValidationError::MissingImage);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.price == 0 {
            return Err(ValidationError::ZeroPrice);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitIntent {
    Create,
    Update,
}

/// Everything needed to persist a validated draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    /// Session the draft came from
    pub key: Option<DraftKey>,
    pub intent: SubmitIntent,
    /// `image` is empty when `upload` is set; persist fills it in
    pub item: FoodItem,
    pub upload: Option<EncodedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission for this draft is already running
    InFlight,
    Invalid(ValidationError),
}

/// What a finished submission did to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDone {
    /// The modal session changed while saving; the current draft is untouched
    Stale,
    /// Draft kept for retry
    Failed,
    /// Draft cleared; the superseded preview URL must be released
    Saved { released_preview: Option<String> },
}

/// Result of feeding the current modal session to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftSync {
    Unchanged,
    /// Draft was re-initialized; any superseded preview URL must be released
    Reset { released_preview: Option<String> },
}

#[derive(Debug, Clone, Default)]
pub struct FoodEditor {
    key: Option<DraftKey>,
    draft: FoodDraft,
    submitting: bool,
    pub ingredients: IngredientEditor,
}

impl FoodEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FoodDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FoodDraft {
        &mut self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[cfg(test)]
    pub fn is_editing(&self) -> bool {
        self.draft.id.is_some()
    }

    pub fn key(&self) -> Option<&DraftKey> {
        self.key.as_ref()
    }

    /// Put a freshly read photo into the draft of session `key`. Returns the
    /// preview URL to release: the superseded one, or the new one when the
    /// session has changed since the read started.
    pub fn select_image(
        &mut self,
        key: Option<&DraftKey>,
        preview_url: String,
        encoded: EncodedImage,
    ) -> Option<String> {
        if key.is_none() || self.key.as_ref() != key {
            return Some(preview_url);
        }
        self.draft.image.select(preview_url, encoded)
    }

    pub fn needs_sync(&self, key: Option<&DraftKey>) -> bool {
        self.key.as_ref() != key
    }

    /// Seed the draft when the session changes. `key` is None while the
    /// modal is closed; `source` is the food being edited, if any.
    pub fn sync(&mut self, key: Option<&DraftKey>, source: Option<&FoodItem>) -> DraftSync {
        if !self.needs_sync(key) {
            return DraftSync::Unchanged;
        }
        let released_preview = self.draft.image.reset(None);
        self.key = key.cloned();
        self.draft = match source {
            Some(item) if key.is_some() => FoodDraft::from_item(item),
            _ => FoodDraft::default(),
        };
        self.submitting = false;
        self.ingredients.close();
        self.ingredients.cancel_delete();
        DraftSync::Reset { released_preview }
    }

    /// Validate and lock the draft for submission
    pub fn begin_submit(&mut self) -> Result<SubmitPlan, SubmitBlocked> {
        if self.submitting {
            return Err(SubmitBlocked::InFlight);
        }
        let category = self.draft.validate().map_err(SubmitBlocked::Invalid)?;
        let draft = &self.draft;
        let (intent, id) = match &draft.id {
            Some(id) => (SubmitIntent::Update, id.clone()),
            None => (SubmitIntent::Create, new_id()),
        };
        let upload = draft.image.pending_upload().cloned();
        let image = match &upload {
            Some(_) => String::new(),
            None => draft.image.existing().unwrap_or_default().to_string(),
        };
        let item = FoodItem {
            id,
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            price: draft.price,
            available: draft.available,
            image,
            category,
            ingredients: draft.ingredients.clone(),
        };
        self.submitting = true;
        Ok(SubmitPlan {
            key: self.key.clone(),
            intent,
            item,
            upload,
        })
    }

    /// Unlock after persistence of the draft submitted under `key`.
    /// Completions from an earlier session leave the current one alone.
    pub fn finish_submit<T>(&mut self, key: Option<&DraftKey>, result: &AppResult<T>) -> SubmitDone {
        if self.key.as_ref() != key {
            return SubmitDone::Stale;
        }
        self.submitting = false;
        if result.is_err() {
            return SubmitDone::Failed;
        }
        let released_preview = self.draft.image.reset(None);
        self.draft = FoodDraft::default();
        SubmitDone::Saved { released_preview }
    }
}

/// Upload the photo if a new one was picked, then create or update
pub async fn persist<B: MenuBackend>(backend: &B, plan: SubmitPlan) -> AppResult<FoodItem> {
    let mut item = plan.item;
    if let Some(upload) = &plan.upload {
        item.image = backend.upload_image(upload).await?;
    }
    match plan.intent {
        SubmitIntent::Create => backend.create(&item).await?,
        SubmitIntent::Update => backend.update(&item).await?,
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ErrorHandler, LocalBackend, SnapshotHandler, Subscription};
    use crate::error::AppError;
    use crate::image::encode_image;
    use futures::executor::block_on;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stored(id: &str) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: "Lasanha".to_string(),
            description: "Bolonhesa".to_string(),
            price: 4590,
            available: false,
            image: "asset://localhost/lasanha.png".to_string(),
            category: Category::Pasta,
            ingredients: vec![IngredientItem {
                id: "i1".to_string(),
                name: "Queijo".to_string(),
                price: 300,
            }],
        }
    }

    fn key(session: u64, target: Option<&str>) -> DraftKey {
        DraftKey {
            session,
            target: target.map(str::to_string),
        }
    }

    fn filled_create_draft(editor: &mut FoodEditor) {
        editor.sync(Some(&key(1, None)), None);
        let draft = editor.draft_mut();
        draft.category = Some(Category::Pizza);
        draft.image.select(
            "blob:preview".to_string(),
            encode_image("p.png", "image/png", b"png").unwrap(),
        );
        draft.name = "Margherita".to_string();
        draft.price = 3990;
        draft.description = "Tomate e manjericão".to_string();
    }

    #[test]
    fn test_validation_reports_first_rule_in_order() {
        let mut draft = FoodDraft::default();
        assert_eq!(draft.validate(), Err(ValidationError::MissingCategory));

        draft.category = Some(Category::Soup);
        assert_eq!(draft.validate(), Err(ValidationError::MissingImage));

        draft.image = ImageSelection::from_existing("asset://localhost/x.png");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));

        draft.name = "  ".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));

        draft.name = "Caldo verde".to_string();
        assert_eq!(draft.validate(), Err(ValidationError::ZeroPrice));

        draft.price = 1800;
        assert_eq!(draft.validate(), Err(ValidationError::EmptyDescription));

        draft.description = "Couve".to_string();
        assert_eq!(draft.validate(), Ok(Category::Soup));
    }

    #[test]
    fn test_draft_seeds_once_per_session() {
        let item = stored("f1");
        let mut editor = FoodEditor::new();
        let k = key(1, Some("f1"));

        assert!(matches!(editor.sync(Some(&k), Some(&item)), DraftSync::Reset { .. }));
        editor.draft_mut().name = "Lasanha da casa".to_string();

        // A snapshot changed the stored food while the modal is open
        let mut remote = item.clone();
        remote.name = "Outro nome".to_string();
        assert_eq!(editor.sync(Some(&k), Some(&remote)), DraftSync::Unchanged);
        assert_eq!(editor.draft().name, "Lasanha da casa");

        // Reopening starts a new session
        editor.sync(Some(&key(2, Some("f1"))), Some(&remote));
        assert_eq!(editor.draft().name, "Outro nome");
    }

    #[test]
    fn test_reopen_create_after_edit_clears_fields() {
        let mut editor = FoodEditor::new();
        editor.sync(Some(&key(1, Some("f1"))), Some(&stored("f1")));
        editor.sync(None, None);
        editor.sync(Some(&key(2, None)), None);

        assert_eq!(editor.draft(), &FoodDraft::default());
        assert!(!editor.is_editing());
    }

    #[test]
    fn test_session_change_releases_preview() {
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);
        assert_eq!(
            editor.sync(None, None),
            DraftSync::Reset {
                released_preview: Some("blob:preview".to_string())
            }
        );
    }

    #[test]
    fn test_submit_plan_for_create() {
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);

        let plan = editor.begin_submit().unwrap();
        assert_eq!(plan.intent, SubmitIntent::Create);
        assert_eq!(plan.item.price, 3990);
        assert!(plan.item.available);
        assert!(plan.item.image.is_empty());
        assert_eq!(plan.upload.as_ref().map(|u| u.name.as_str()), Some("p.png"));
        assert_eq!(plan.item.id.len(), 36);
    }

    #[test]
    fn test_submit_plan_for_edit_keeps_id_and_image() {
        let mut editor = FoodEditor::new();
        editor.sync(Some(&key(1, Some("f1"))), Some(&stored("f1")));

        let plan = editor.begin_submit().unwrap();
        assert_eq!(plan.intent, SubmitIntent::Update);
        assert_eq!(plan.item, stored("f1"));
        assert!(plan.upload.is_none());
    }

    #[test]
    fn test_duplicate_submit_blocked_while_in_flight() {
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);

        assert!(editor.begin_submit().is_ok());
        assert_eq!(editor.begin_submit(), Err(SubmitBlocked::InFlight));

        let failed: AppResult<()> = Err(AppError::Store("offline".into()));
        assert_eq!(editor.finish_submit(Some(&key(1, None)), &failed), SubmitDone::Failed);
        assert!(!editor.is_submitting());
        // Draft kept for retry
        assert_eq!(editor.draft().name, "Margherita");
        assert!(editor.begin_submit().is_ok());
    }

    #[test]
    fn test_completion_from_earlier_session_leaves_new_draft_alone() {
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);
        let plan = editor.begin_submit().unwrap();

        // Modal closed and reopened on another food while saving
        editor.sync(None, None);
        editor.sync(Some(&key(3, Some("f2"))), Some(&stored("f2")));
        editor.draft_mut().name = "Lasanha nova".to_string();
        assert!(!editor.is_submitting());

        let saved: AppResult<()> = Ok(());
        assert_eq!(editor.finish_submit(plan.key.as_ref(), &saved), SubmitDone::Stale);
        assert_eq!(editor.draft().id.as_deref(), Some("f2"));
        assert_eq!(editor.draft().name, "Lasanha nova");

        let failed: AppResult<()> = Err(AppError::Store("offline".into()));
        assert_eq!(editor.finish_submit(plan.key.as_ref(), &failed), SubmitDone::Stale);
        assert_eq!(editor.draft().name, "Lasanha nova");
    }

    #[test]
    fn test_photo_read_for_closed_session_is_dropped() {
        let mut editor = FoodEditor::new();
        editor.sync(Some(&key(1, None)), None);
        let started = editor.key().cloned();

        editor.sync(None, None);
        editor.sync(Some(&key(2, Some("f1"))), Some(&stored("f1")));

        let photo = encode_image("late.png", "image/png", b"png").unwrap();
        let released = editor.select_image(started.as_ref(), "blob:late".to_string(), photo);
        assert_eq!(released.as_deref(), Some("blob:late"));
        assert_eq!(editor.draft().image.existing(), Some("asset://localhost/lasanha.png"));
    }

    #[test]
    fn test_photo_read_for_current_session_replaces_preview() {
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);
        let current = editor.key().cloned();

        let photo = encode_image("b.png", "image/png", b"png").unwrap();
        let released = editor.select_image(current.as_ref(), "blob:b".to_string(), photo);
        assert_eq!(released.as_deref(), Some("blob:preview"));
        assert_eq!(editor.draft().image.display_src(), Some("blob:b"));
    }

    #[test]
    fn test_invalid_draft_does_not_lock() {
        let mut editor = FoodEditor::new();
        editor.sync(Some(&key(1, None)), None);
        assert_eq!(
            editor.begin_submit(),
            Err(SubmitBlocked::Invalid(ValidationError::MissingCategory))
        );
        assert!(!editor.is_submitting());
    }

    #[test]
    fn test_persist_uploads_then_creates() {
        let backend = LocalBackend::new();
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);

        let plan = editor.begin_submit().unwrap();
        let submitted = plan.key.clone();
        let result = block_on(persist(&backend, plan));
        assert_eq!(
            editor.finish_submit(submitted.as_ref(), &result),
            SubmitDone::Saved {
                released_preview: Some("blob:preview".to_string())
            }
        );

        let saved = result.unwrap();
        assert!(saved.image.starts_with("data:image/png;base64,"));
        assert_eq!(backend.foods(), vec![saved]);
        assert_eq!(editor.draft(), &FoodDraft::default());
    }

    #[test]
    fn test_persist_updates_existing() {
        let backend = LocalBackend::with_foods(vec![stored("f1")]);
        let mut editor = FoodEditor::new();
        editor.sync(Some(&key(1, Some("f1"))), Some(&stored("f1")));
        editor.draft_mut().price = 5000;

        let plan = editor.begin_submit().unwrap();
        block_on(persist(&backend, plan)).unwrap();

        let foods = backend.foods();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].price, 5000);
        assert_eq!(foods[0].ingredients, stored("f1").ingredients);
    }

    /// Counts writes and fails uploads
    struct BrokenStorage {
        writes: AtomicUsize,
    }

    impl MenuBackend for BrokenStorage {
        async fn create(&self, _: &FoodItem) -> AppResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn update(&self, _: &FoodItem) -> AppResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        async fn set_availability(&self, _: &str, _: bool) -> AppResult<()> {
            Ok(())
        }
        async fn delete(&self, _: &str) -> AppResult<()> {
            Ok(())
        }
        async fn upload_image(&self, _: &EncodedImage) -> AppResult<String> {
            Err(AppError::Storage("disk full".into()))
        }
        fn subscribe(&self, _: SnapshotHandler, _: ErrorHandler) -> Subscription {
            Subscription::new(|| {})
        }
    }

    #[test]
    fn test_failed_upload_writes_nothing() {
        let backend = BrokenStorage {
            writes: AtomicUsize::new(0),
        };
        let mut editor = FoodEditor::new();
        filled_create_draft(&mut editor);

        let plan = editor.begin_submit().unwrap();
        let result = block_on(persist(&backend, plan));
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(backend.writes.load(Ordering::SeqCst), 0);
    }
}
