//! Repository Integration Tests
//!
//! Tests for FoodRepository with in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::domain::{Category, DomainError, Food, Ingredient};
    use crate::repository::{init_db, FoodRepository, Repository};
    use std::path::PathBuf;

    fn setup_test_db() -> FoodRepository {
        // Use in-memory database for tests
        let conn = init_db(&PathBuf::from(":memory:")).expect("Failed to init test DB");
        FoodRepository::new(conn)
    }

    fn food(id: &str, name: &str) -> Food {
        Food {
            id: id.to_string(),
            name: name.to_string(),
            description: "Da casa".to_string(),
            price: 3200,
            available: true,
            image: format!("asset://localhost/{}.png", id),
            category: Category::Pizza,
            ingredients: vec![Ingredient {
                id: "i1".to_string(),
                name: "Mussarela".to_string(),
                price: 500,
            }],
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = setup_test_db();

        let created = repo.create(&food("f1", "Calabresa")).await.expect("Failed to create");
        assert_eq!(created.name, "Calabresa");

        let found = repo.find_by_id(&"f1".to_string()).await.expect("Find failed");
        assert_eq!(found, Some(food("f1", "Calabresa")));
        assert_eq!(repo.find_by_id(&"nope".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_existing_id_conflicts() {
        let repo = setup_test_db();
        repo.create(&food("f1", "Calabresa")).await.unwrap();

        let err = repo.create(&food("f1", "Outra")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(repo.list().await.unwrap()[0].name, "Calabresa");
    }

    #[tokio::test]
    async fn test_list_keeps_arrival_order() {
        let repo = setup_test_db();
        for (id, name) in [("c", "Portuguesa"), ("a", "Marguerita"), ("b", "Atum")] {
            repo.create(&food(id, name)).await.unwrap();
        }
        // Updating does not move a food
        let mut first = food("c", "Portuguesa especial");
        first.price = 4500;
        repo.update(&first).await.unwrap();

        let ids: Vec<String> = repo.list().await.unwrap().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let repo = setup_test_db();
        repo.create(&food("f1", "Calabresa")).await.unwrap();

        let mut changed = food("f1", "Calabresa acebolada");
        changed.ingredients.clear();
        changed.category = Category::Portions;
        repo.update(&changed).await.expect("Update failed");

        let stored = repo.find_by_id(&"f1".to_string()).await.unwrap().unwrap();
        assert_eq!(stored, changed);
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let repo = setup_test_db();
        let missing = "ghost".to_string();

        assert!(matches!(repo.update(&food("ghost", "x")).await, Err(DomainError::NotFound(_))));
        assert!(matches!(repo.delete(&missing).await, Err(DomainError::NotFound(_))));
        assert!(matches!(
            repo.set_availability(&missing, false).await,
            Err(DomainError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_set_availability_touches_only_the_flag() {
        let repo = setup_test_db();
        repo.create(&food("f1", "Calabresa")).await.unwrap();

        let updated = repo.set_availability("f1", false).await.unwrap();
        assert!(!updated.available);

        let stored = repo.find_by_id(&"f1".to_string()).await.unwrap().unwrap();
        assert_eq!(stored, Food { available: false, ..food("f1", "Calabresa") });
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup_test_db();
        repo.create(&food("f1", "Calabresa")).await.unwrap();
        repo.create(&food("f2", "Atum")).await.unwrap();

        repo.delete(&"f1".to_string()).await.expect("Delete failed");

        let remaining = repo.list().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "f2");
    }

    #[tokio::test]
    async fn test_invalid_food_rejected_before_write() {
        let repo = setup_test_db();
        let mut bad = food("f1", "Calabresa");
        bad.ingredients.push(bad.ingredients[0].clone());

        assert!(matches!(repo.create(&bad).await, Err(DomainError::InvalidInput(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_referenced_images() {
        let repo = setup_test_db();
        repo.create(&food("f1", "Calabresa")).await.unwrap();
        repo.create(&food("f2", "Atum")).await.unwrap();

        let images = repo.referenced_images().await.unwrap();
        assert!(images.contains("asset://localhost/f1.png"));
        assert_eq!(images.len(), 2);
    }
}
