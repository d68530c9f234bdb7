//! Integration tests for the SQLite repository.
//!
//! Each test runs against its own private in-memory database with the full
//! migration set applied.

use gamelib_core::{GameId, Price, Rating, Username};
use gamelib_store::models::{Game, Genre, NewReview, Platforms, Publisher, User, Wishlist};
use gamelib_store::repository::{Repository, RepositoryError};
use gamelib_store::{DatabaseRepository, db};

async fn repo() -> DatabaseRepository {
    let pool = db::create_in_memory_pool().await.expect("pool");
    db::migrate(&pool).await.expect("migrations");
    DatabaseRepository::new(pool)
}

fn game(id: i64, title: &str) -> Game {
    Game::new(GameId::new(id), title)
}

fn user(name: &str) -> User {
    User::new(Username::parse(name).unwrap(), format!("hash-of-{name}"))
}

fn username(name: &str) -> Username {
    Username::parse(name).unwrap()
}

fn sample_game() -> Game {
    let mut g = game(7940, "Call of Duty (R) 4");
    g.price = Price::new(9.99).unwrap();
    g.release_date = "Nov 12, 2007".to_owned();
    g.description = Some("The new action-thriller.".to_owned());
    g.image_url = Some("https://cdn.example.com/7940/header.jpg".to_owned());
    g.platforms = Platforms {
        windows: true,
        mac: false,
        linux: false,
    };
    g.publisher = Some(Publisher::new("Activision"));
    g.add_genre(Genre::new("Action"));
    g
}

#[tokio::test]
async fn game_round_trips_with_genres_and_publisher() {
    let repo = repo().await;
    repo.add_game(sample_game()).await.unwrap();

    let stored = repo.game_by_id(GameId::new(7940)).await.unwrap().unwrap();
    assert_eq!(stored.title, "Call of Duty (R) 4");
    assert_eq!(stored.price, Price::new(9.99).unwrap());
    assert_eq!(stored.publisher, Some(Publisher::new("Activision")));
    assert_eq!(stored.genres(), [Genre::new("Action")]);
    assert!(stored.platforms.windows);
    assert!(!stored.platforms.linux);
}

#[tokio::test]
async fn add_game_is_an_upsert_by_id() {
    let repo = repo().await;
    repo.add_game(sample_game()).await.unwrap();

    let mut updated = sample_game();
    updated.price = Price::new(4.99).unwrap();
    updated.add_genre(Genre::new("Shooter"));
    repo.add_game(updated).await.unwrap();

    let games = repo.all_games().await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].price, Price::new(4.99).unwrap());
    assert_eq!(
        games[0].genres(),
        [Genre::new("Action"), Genre::new("Shooter")]
    );
}

#[tokio::test]
async fn all_games_is_ordered_by_id() {
    let repo = repo().await;
    for id in [30, 10, 20] {
        repo.add_game(game(id, "Game")).await.unwrap();
    }

    let ids: Vec<_> = repo
        .all_games()
        .await
        .unwrap()
        .iter()
        .map(|g| g.id.as_i64())
        .collect();
    assert_eq!(ids, [10, 20, 30]);
}

#[tokio::test]
async fn game_by_id_returns_none_for_missing_ids() {
    let repo = repo().await;
    assert!(repo.game_by_id(GameId::new(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn genre_filter_uses_or_semantics() {
    let repo = repo().await;

    let mut action = game(1, "Action Game");
    action.add_genre(Genre::new("Action"));
    let mut rpg = game(2, "RPG Game");
    rpg.add_genre(Genre::new("RPG"));
    let plain = game(3, "Plain Game");

    for g in [action, rpg, plain] {
        repo.add_game(g).await.unwrap();
    }

    let filtered = repo
        .games_by_genres(&[Genre::new("Action"), Genre::new("RPG")])
        .await
        .unwrap();
    let ids: Vec<_> = filtered.iter().map(|g| g.id.as_i64()).collect();
    assert_eq!(ids, [1, 2]);

    assert_eq!(repo.games_by_genres(&[]).await.unwrap().len(), 3);
}

#[tokio::test]
async fn duplicate_genre_and_publisher_adds_keep_counts() {
    let repo = repo().await;

    repo.add_genre(Genre::new("Action")).await.unwrap();
    repo.add_genre(Genre::new("Action")).await.unwrap();
    assert_eq!(repo.all_genres().await.unwrap(), [Genre::new("Action")]);

    repo.add_publisher(Publisher::new("Activision")).await.unwrap();
    repo.add_publisher(Publisher::new("Activision")).await.unwrap();
    assert_eq!(repo.all_publishers().await.unwrap().len(), 1);
}

#[tokio::test]
async fn add_user_upserts_by_username() {
    let repo = repo().await;
    repo.add_user(user("thorke")).await.unwrap();
    repo.add_user(User::new(username("thorke"), "new-hash".to_owned()))
        .await
        .unwrap();

    let users = repo.all_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].password_hash, "new-hash");
}

#[tokio::test]
async fn user_lookup_is_case_insensitive() {
    let repo = repo().await;
    repo.add_user(user("thorke")).await.unwrap();

    assert!(repo.user_by_name("Thorke").await.unwrap().is_some());
    assert!(repo.user_by_name("thorke").await.unwrap().is_some());
    assert!(repo.user_by_name("missing").await.unwrap().is_none());
    assert!(repo.user_by_name("  ").await.unwrap().is_none());
}

#[tokio::test]
async fn reviews_are_assigned_ids_and_listed_in_creation_order() {
    let repo = repo().await;
    repo.add_user(user("shyamli")).await.unwrap();
    repo.add_game(game(1, "Domino Game")).await.unwrap();

    let first = repo
        .add_review(NewReview {
            author: username("shyamli"),
            game: GameId::new(1),
            rating: Rating::new(5).unwrap(),
            comment: "This is a review".to_owned(),
        })
        .await
        .unwrap();
    let second = repo
        .add_review(NewReview {
            author: username("shyamli"),
            game: GameId::new(1),
            rating: Rating::new(2).unwrap(),
            comment: "Second thoughts".to_owned(),
        })
        .await
        .unwrap();

    assert!(first.id < second.id);

    let reviews = repo.all_reviews().await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].comment, "This is a review");
    assert_eq!(reviews[1].rating, Rating::new(2).unwrap());
}

#[tokio::test]
async fn orphan_reviews_are_rejected_with_a_conflict() {
    let repo = repo().await;
    repo.add_game(game(1, "Domino Game")).await.unwrap();

    // Unknown author.
    let result = repo
        .add_review(NewReview {
            author: username("nobody"),
            game: GameId::new(1),
            rating: Rating::new(3).unwrap(),
            comment: String::new(),
        })
        .await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    // Unknown game.
    repo.add_user(user("shyamli")).await.unwrap();
    let result = repo
        .add_review(NewReview {
            author: username("shyamli"),
            game: GameId::new(404),
            rating: Rating::new(3).unwrap(),
            comment: String::new(),
        })
        .await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    // A failed write leaves nothing behind.
    assert!(repo.all_reviews().await.unwrap().is_empty());
}

#[tokio::test]
async fn wishlist_round_trips_preserving_order() {
    let repo = repo().await;
    repo.add_user(user("thorke")).await.unwrap();
    let owner = username("thorke");

    repo.add_game(game(2, "B")).await.unwrap();
    repo.add_game(game(1, "A")).await.unwrap();

    assert!(repo.wishlist(&owner).await.unwrap().is_none());

    // Wishlist order is insertion order, not id order.
    let wishlist = Wishlist::from_games([game(2, "B"), game(1, "A")]);
    repo.add_wishlist(&owner, wishlist.clone()).await.unwrap();

    let stored = repo.wishlist(&owner).await.unwrap().unwrap();
    assert_eq!(stored, wishlist);
    let ids: Vec<_> = stored.games().iter().map(|g| g.id.as_i64()).collect();
    assert_eq!(ids, [2, 1]);
}

#[tokio::test]
async fn add_wishlist_upserts_and_update_requires_existing() {
    let repo = repo().await;
    repo.add_user(user("thorke")).await.unwrap();
    let owner = username("thorke");

    repo.add_game(game(1, "A")).await.unwrap();
    repo.add_game(game(2, "B")).await.unwrap();

    // Update before any wishlist exists: no-op.
    repo.update_wishlist(&owner, Wishlist::from_games([game(1, "A")]))
        .await
        .unwrap();
    assert!(repo.wishlist(&owner).await.unwrap().is_none());

    repo.add_wishlist(&owner, Wishlist::from_games([game(1, "A")]))
        .await
        .unwrap();
    // Second add replaces the game list wholesale.
    repo.add_wishlist(&owner, Wishlist::from_games([game(2, "B")]))
        .await
        .unwrap();

    let stored = repo.wishlist(&owner).await.unwrap().unwrap();
    assert_eq!(stored.games().len(), 1);
    assert_eq!(stored.games()[0].id, GameId::new(2));
}

#[tokio::test]
async fn wishlist_for_unknown_user_is_a_conflict() {
    let repo = repo().await;
    let result = repo
        .add_wishlist(&username("ghost"), Wishlist::new())
        .await;
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
async fn remove_game_from_wishlist_is_total() {
    let repo = repo().await;
    repo.add_user(user("thorke")).await.unwrap();
    let owner = username("thorke");

    // No wishlist yet: no-op, no error.
    repo.remove_game_from_wishlist(&owner, GameId::new(1))
        .await
        .unwrap();

    repo.add_game(game(1, "A")).await.unwrap();
    repo.add_game(game(2, "B")).await.unwrap();
    repo.add_wishlist(&owner, Wishlist::from_games([game(1, "A"), game(2, "B")]))
        .await
        .unwrap();

    repo.remove_game_from_wishlist(&owner, GameId::new(1))
        .await
        .unwrap();
    let stored = repo.wishlist(&owner).await.unwrap().unwrap();
    assert!(!stored.contains(GameId::new(1)));
    assert_eq!(stored.len(), 1);

    // Absent game: no-op.
    repo.remove_game_from_wishlist(&owner, GameId::new(1))
        .await
        .unwrap();
    assert_eq!(repo.wishlist(&owner).await.unwrap().unwrap().len(), 1);
}
