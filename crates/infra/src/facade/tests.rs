use std::sync::Arc;

use hbnb_auth::{PasswordError, PasswordHasher, Principal};
use hbnb_core::{AmenityId, Entity, ErrorKind, PlaceId, ReviewId, UserId};
use hbnb_users::User;

use super::*;

/// Reversible stand-in so tests do not pay for Argon2.
struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(format!("plain:{plaintext}"))
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        hash == format!("plain:{plaintext}")
    }
}

fn facade() -> HbnbFacade {
    HbnbFacade::in_memory(Arc::new(PlainHasher))
}

fn register(facade: &HbnbFacade, email: &str) -> User {
    facade
        .create_user(UserRegistration {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: "pw".to_string(),
            is_admin: false,
        })
        .unwrap()
}

fn principal(user: &User) -> Principal {
    Principal {
        user_id: *user.id(),
        is_admin: user.is_admin(),
    }
}

fn draft(title: &str) -> PlaceDraft {
    PlaceDraft {
        title: title.to_string(),
        description: None,
        price: 100.0,
        latitude: 48.85,
        longitude: 2.35,
        amenities: vec![],
    }
}

fn review_of(place_id: PlaceId, rating: i64) -> ReviewDraft {
    ReviewDraft {
        place_id,
        text: "Lovely stay".to_string(),
        rating,
    }
}

/// Admin A, regular users B and C, and a place P owned by B.
struct World {
    facade: HbnbFacade,
    admin: User,
    owner: User,
    guest: User,
    place_id: PlaceId,
}

fn world() -> World {
    let facade = facade();
    let admin = register(&facade, "a@example.com");
    let owner = register(&facade, "b@example.com");
    let guest = register(&facade, "c@example.com");
    let place = facade
        .create_place(&principal(&owner), draft("Cozy loft"))
        .unwrap();
    World {
        place_id: *place.id(),
        facade,
        admin,
        owner,
        guest,
    }
}

#[test]
fn first_user_is_admin_regardless_of_payload() {
    let facade = facade();
    let first = register(&facade, "first@example.com");
    let second = register(&facade, "second@example.com");

    assert!(first.is_admin());
    assert!(!second.is_admin());
}

#[test]
fn later_users_keep_the_requested_flag() {
    let facade = facade();
    register(&facade, "first@example.com");
    let promoted = facade
        .create_user(UserRegistration {
            first_name: "Root".to_string(),
            last_name: "Two".to_string(),
            email: "root2@example.com".to_string(),
            password: "pw".to_string(),
            is_admin: true,
        })
        .unwrap();
    assert!(promoted.is_admin());
}

#[test]
fn duplicate_email_is_a_conflict() {
    let facade = facade();
    register(&facade, "dup@example.com");

    let err = facade
        .create_user(UserRegistration {
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            email: "Dup@Example.com".to_string(),
            password: "pw".to_string(),
            is_admin: false,
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "Email already registered");
    assert_eq!(facade.get_users().len(), 1);
}

#[test]
fn invalid_registration_is_rejected_before_storage() {
    let facade = facade();
    let err = facade
        .create_user(UserRegistration {
            first_name: "".to_string(),
            last_name: "User".to_string(),
            email: "x@example.com".to_string(),
            password: "pw".to_string(),
            is_admin: false,
        })
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(facade.get_users().is_empty());
}

#[test]
fn password_is_stored_hashed() {
    let facade = facade();
    let user = register(&facade, "a@example.com");
    assert_eq!(user.password_hash(), "plain:pw");
}

#[test]
fn authenticate_checks_credentials() {
    let facade = facade();
    let user = register(&facade, "login@example.com");

    let ok = facade.authenticate("LOGIN@example.com", "pw").unwrap();
    assert_eq!(ok.id(), user.id());

    let wrong = facade.authenticate("login@example.com", "nope").unwrap_err();
    let unknown = facade.authenticate("ghost@example.com", "pw").unwrap_err();
    assert_eq!(wrong.kind(), ErrorKind::Unauthenticated);
    assert_eq!(wrong.to_string(), unknown.to_string());
}

#[test]
fn user_may_edit_own_name_only() {
    let w = world();
    let me = principal(&w.guest);

    let renamed = w
        .facade
        .update_user(
            &me,
            *w.guest.id(),
            UserChanges {
                first_name: Some("Carol".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap();
    assert_eq!(renamed.first_name(), "Carol");

    let err = w
        .facade
        .update_user(
            &me,
            *w.guest.id(),
            UserChanges {
                email: Some("new@example.com".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = w
        .facade
        .update_user(
            &me,
            *w.owner.id(),
            UserChanges {
                first_name: Some("Mallory".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[test]
fn admin_can_change_credentials_but_not_steal_an_email() {
    let w = world();
    let admin = principal(&w.admin);

    let updated = w
        .facade
        .update_user(
            &admin,
            *w.guest.id(),
            UserChanges {
                email: Some("carol@example.com".to_string()),
                password: Some("fresh".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap();
    assert_eq!(updated.email(), "carol@example.com");
    assert!(w.facade.authenticate("carol@example.com", "fresh").is_ok());

    let err = w
        .facade
        .update_user(
            &admin,
            *w.guest.id(),
            UserChanges {
                email: Some("b@example.com".to_string()),
                ..UserChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn failed_update_leaves_user_unchanged() {
    let w = world();
    let err = w
        .facade
        .update_user(
            &principal(&w.guest),
            *w.guest.id(),
            UserChanges {
                first_name: Some("Valid".to_string()),
                last_name: Some("x".repeat(51)),
                ..UserChanges::default()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(w.facade.get_user(*w.guest.id()).unwrap().first_name(), "Test");
}

#[test]
fn update_unknown_user_is_not_found_for_admin() {
    let w = world();
    let err = w
        .facade
        .update_user(&principal(&w.admin), UserId::new(), UserChanges::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn seed_admin_is_idempotent() {
    let facade = facade();
    register(&facade, "someone@example.com");
    let seed = || UserRegistration {
        first_name: "Seed".to_string(),
        last_name: "Admin".to_string(),
        email: "admin@hbnb.io".to_string(),
        password: "admin1234".to_string(),
        is_admin: false,
    };

    let created = facade.seed_admin(seed()).unwrap().unwrap();
    assert!(created.is_admin());
    assert!(facade.seed_admin(seed()).unwrap().is_none());
    assert_eq!(facade.get_users().len(), 2);
}

#[test]
fn create_place_links_owner_and_checks_amenities() {
    let w = world();
    let owner = w.facade.get_user(*w.owner.id()).unwrap();
    assert_eq!(owner.place_ids(), &[w.place_id]);
    assert_eq!(w.facade.get_places_by_owner(*w.owner.id()).unwrap().len(), 1);

    let mut bad = draft("Ghost amenities");
    bad.amenities = vec![AmenityId::new()];
    let err = w
        .facade
        .create_place(&principal(&w.owner), bad)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(w.facade.get_places().len(), 1);
}

#[test]
fn create_place_for_unknown_caller_is_not_found() {
    let w = world();
    let err = w
        .facade
        .create_place(&Principal::user(UserId::new()), draft("Nowhere"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn create_place_validates_coordinates() {
    let w = world();
    let mut bad = draft("Off the map");
    bad.latitude = 91.0;
    let err = w
        .facade
        .create_place(&principal(&w.owner), bad)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn place_update_authorization() {
    let w = world();
    let changes = |title: &str| PlaceChanges {
        title: Some(title.to_string()),
        ..PlaceChanges::default()
    };

    let err = w
        .facade
        .update_place(&principal(&w.guest), w.place_id, changes("Hijacked"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let by_owner = w
        .facade
        .update_place(&principal(&w.owner), w.place_id, changes("Owner edit"))
        .unwrap();
    assert_eq!(by_owner.title(), "Owner edit");

    let by_admin = w
        .facade
        .update_place(&principal(&w.admin), w.place_id, changes("Admin edit"))
        .unwrap();
    assert_eq!(by_admin.title(), "Admin edit");
    assert_eq!(by_admin.owner_id(), *w.owner.id());
}

#[test]
fn update_missing_place_is_not_found() {
    let w = world();
    let err = w
        .facade
        .update_place(&principal(&w.admin), PlaceId::new(), PlaceChanges::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn amenities_are_admin_only_and_unique() {
    let w = world();
    let err = w
        .facade
        .create_amenity(
            &principal(&w.owner),
            AmenityDraft {
                name: "Wifi".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let admin = principal(&w.admin);
    w.facade
        .create_amenity(
            &admin,
            AmenityDraft {
                name: "Wifi".to_string(),
            },
        )
        .unwrap();
    let err = w
        .facade
        .create_amenity(
            &admin,
            AmenityDraft {
                name: "wifi".to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn add_place_amenities_skips_duplicates() {
    let w = world();
    let admin = principal(&w.admin);
    let wifi = w
        .facade
        .create_amenity(&admin, AmenityDraft { name: "Wifi".to_string() })
        .unwrap();
    let pool = w
        .facade
        .create_amenity(&admin, AmenityDraft { name: "Pool".to_string() })
        .unwrap();

    let owner = principal(&w.owner);
    w.facade
        .add_place_amenities(&owner, w.place_id, vec![*wifi.id()])
        .unwrap();
    let place = w
        .facade
        .add_place_amenities(&owner, w.place_id, vec![*wifi.id(), *pool.id()])
        .unwrap();
    assert_eq!(place.amenity_ids(), &[*wifi.id(), *pool.id()]);

    let names: Vec<String> = w
        .facade
        .get_place_amenities(w.place_id)
        .unwrap()
        .iter()
        .map(|a| a.name().to_string())
        .collect();
    assert_eq!(names, vec!["Wifi", "Pool"]);

    let err = w
        .facade
        .add_place_amenities(&owner, w.place_id, vec![])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn deleting_an_amenity_unlinks_it_from_places() {
    let w = world();
    let admin = principal(&w.admin);
    let wifi = w
        .facade
        .create_amenity(&admin, AmenityDraft { name: "Wifi".to_string() })
        .unwrap();
    w.facade
        .add_place_amenities(&principal(&w.owner), w.place_id, vec![*wifi.id()])
        .unwrap();

    w.facade.delete_amenity(&admin, *wifi.id()).unwrap();

    assert!(w.facade.get_place(w.place_id).unwrap().amenity_ids().is_empty());
    assert_eq!(
        w.facade.get_amenity(*wifi.id()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn linking_races_with_amenity_deletion_without_dangling_ids() {
    let w = world();
    let facade = Arc::new(w.facade);
    let admin = principal(&w.admin);
    let owner = principal(&w.owner);
    let place_id = w.place_id;

    for round in 0..200 {
        let amenity = facade
            .create_amenity(&admin, AmenityDraft { name: format!("Amenity {round}") })
            .unwrap();
        let amenity_id = *amenity.id();
        let barrier = Arc::new(std::sync::Barrier::new(2));

        let linker = {
            let (facade, barrier) = (Arc::clone(&facade), Arc::clone(&barrier));
            std::thread::spawn(move || {
                barrier.wait();
                let _ = facade.add_place_amenities(&owner, place_id, vec![amenity_id]);
            })
        };
        let remover = {
            let (facade, barrier) = (Arc::clone(&facade), Arc::clone(&barrier));
            std::thread::spawn(move || {
                barrier.wait();
                facade.delete_amenity(&admin, amenity_id).unwrap();
            })
        };
        linker.join().unwrap();
        remover.join().unwrap();

        let place = facade.get_place(place_id).unwrap();
        for id in place.amenity_ids() {
            assert!(facade.get_amenity(*id).is_ok(), "place links deleted amenity {id}");
        }
    }
}

#[test]
fn owner_cannot_review_own_place() {
    let w = world();
    let err = w
        .facade
        .create_review(&principal(&w.owner), review_of(w.place_id, 5))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "You cannot review your own place");
}

#[test]
fn one_review_per_user_and_place() {
    let w = world();
    let guest = principal(&w.guest);

    let review = w
        .facade
        .create_review(&guest, review_of(w.place_id, 5))
        .unwrap();
    assert_eq!(review.rating(), 5);
    assert!(w.facade.user_already_reviewed(*w.guest.id(), w.place_id));

    let err = w
        .facade
        .create_review(&guest, review_of(w.place_id, 3))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(err.to_string(), "You have already reviewed this place");
    assert_eq!(w.facade.get_reviews().len(), 1);
}

#[test]
fn review_links_both_parents() {
    let w = world();
    let review = w
        .facade
        .create_review(&principal(&w.guest), review_of(w.place_id, 4))
        .unwrap();

    assert_eq!(
        w.facade.get_user(*w.guest.id()).unwrap().review_ids(),
        &[*review.id()]
    );
    assert_eq!(
        w.facade.get_place(w.place_id).unwrap().review_ids(),
        &[*review.id()]
    );
    assert_eq!(w.facade.get_reviews_by_place(w.place_id).unwrap(), vec![review.clone()]);
    assert_eq!(w.facade.get_reviews_by_user(*w.guest.id()).unwrap(), vec![review]);
}

#[test]
fn review_for_missing_place_is_not_found() {
    let w = world();
    let err = w
        .facade
        .create_review(&principal(&w.guest), review_of(PlaceId::new(), 4))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        w.facade.get_reviews_by_place(PlaceId::new()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[test]
fn out_of_range_rating_is_invalid_input() {
    let w = world();
    let guest = principal(&w.guest);
    for rating in [0, 6] {
        let err = w
            .facade
            .create_review(&guest, review_of(w.place_id, rating))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
    assert!(w.facade.get_place(w.place_id).unwrap().review_ids().is_empty());
}

#[test]
fn deleting_a_review_detaches_it_everywhere() {
    let w = world();
    let guest = principal(&w.guest);
    let review = w
        .facade
        .create_review(&guest, review_of(w.place_id, 4))
        .unwrap();

    w.facade.delete_review(&guest, *review.id()).unwrap();

    assert!(w.facade.get_user(*w.guest.id()).unwrap().review_ids().is_empty());
    assert!(w.facade.get_place(w.place_id).unwrap().review_ids().is_empty());
    assert_eq!(
        w.facade.get_review(*review.id()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    // The pair is free again.
    assert!(w.facade.create_review(&guest, review_of(w.place_id, 2)).is_ok());
}

#[test]
fn review_edits_are_author_or_admin() {
    let w = world();
    let review = w
        .facade
        .create_review(&principal(&w.guest), review_of(w.place_id, 4))
        .unwrap();
    let changes = || ReviewChanges {
        rating: Some(2),
        ..ReviewChanges::default()
    };

    let err = w
        .facade
        .update_review(&principal(&w.owner), *review.id(), changes())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    let err = w
        .facade
        .delete_review(&principal(&w.owner), *review.id())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let updated = w
        .facade
        .update_review(&principal(&w.admin), *review.id(), changes())
        .unwrap();
    assert_eq!(updated.rating(), 2);

    let err = w
        .facade
        .update_review(&principal(&w.guest), ReviewId::new(), changes())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn deleting_a_place_removes_its_reviews() {
    let w = world();
    let review = w
        .facade
        .create_review(&principal(&w.guest), review_of(w.place_id, 5))
        .unwrap();

    let err = w
        .facade
        .delete_place(&principal(&w.guest), w.place_id)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    w.facade
        .delete_place(&principal(&w.owner), w.place_id)
        .unwrap();

    assert_eq!(
        w.facade.get_place(w.place_id).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        w.facade.get_review(*review.id()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(w.facade.get_user(*w.owner.id()).unwrap().place_ids().is_empty());
    assert!(w.facade.get_user(*w.guest.id()).unwrap().review_ids().is_empty());
}

#[test]
fn review_scenario_end_to_end() {
    // A (auto admin), B; B creates P; B reviews P; C reviews P twice.
    let facade = facade();
    let a = register(&facade, "a@example.com");
    let b = register(&facade, "b@example.com");
    assert!(a.is_admin());

    let p = facade.create_place(&principal(&b), draft("P")).unwrap();
    let err = facade
        .create_review(&principal(&b), review_of(*p.id(), 4))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let c = register(&facade, "c@example.com");
    facade
        .create_review(&principal(&c), review_of(*p.id(), 5))
        .unwrap();
    let err = facade
        .create_review(&principal(&c), review_of(*p.id(), 5))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn concurrent_duplicate_reviews_store_one() {
    let w = world();
    let facade = Arc::new(w.facade);
    let guest = principal(&w.guest);
    let place_id = w.place_id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let facade = Arc::clone(&facade);
            std::thread::spawn(move || facade.create_review(&guest, review_of(place_id, 5)).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(facade.get_place(place_id).unwrap().review_ids().len(), 1);
}
