//! Store behaviour over the in-memory backend.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};

use kynship_content::settings::BACKUP_KEY;
use kynship_content::{
    ChangeKind, FileBackup, NoBackup, SettingsStore, SyncError, SyncStatus, Table,
    spawn_reload_on_change,
};
use kynship_core::settings::{default_setting, keys};
use kynship_core::{AdminUserId, PageContent, PageKey};
use kynship_integration_tests::TestStores;

const ADMIN: AdminUserId = AdminUserId::new(1);
const WAIT: Duration = Duration::from_secs(2);

// ============================================================================
// Page content
// ============================================================================

#[tokio::test]
async fn test_pages_never_saved_equal_defaults() {
    let stores = TestStores::new();
    stores.load().await;

    for key in PageKey::ALL {
        assert_eq!(
            stores.pages.page_content(key.as_str()),
            PageContent::default_for(key).to_value(),
            "{key}"
        );
    }
}

#[tokio::test]
async fn test_default_home_hero_title() {
    let stores = TestStores::new();
    stores.load().await;

    let home = stores.pages.page_content("home");
    assert_eq!(home["hero"]["title"], "أفضل منتجات الألوميتال في مصر");
}

#[tokio::test]
async fn test_update_is_visible_without_reload() {
    let stores = TestStores::new();
    stores.load().await;

    let mut content = PageContent::default_for(PageKey::Home).to_value();
    content["hero"]["title"] = json!("مطابخ ألوميتال");
    content["stats"]["projects"] = json!("6000");

    stores
        .pages
        .update_page_content(&ADMIN, "home", content.clone())
        .await
        .unwrap();

    assert_eq!(stores.pages.page_content("home"), content);
    assert_eq!(stores.backend.page_upserts(), 1);
}

#[tokio::test]
async fn test_stored_section_replaces_default_section() {
    let stores = TestStores::new();
    stores
        .backend
        .seed_page("home", json!({"hero": {"title": "X"}}), true);
    stores.load().await;

    let home = stores.pages.page_content("home");
    let default = PageContent::default_for(PageKey::Home).to_value();
    assert_eq!(home["hero"]["title"], "X");
    assert_eq!(home["stats"], default["stats"]);
    assert_eq!(home["about"], default["about"]);
}

#[tokio::test]
async fn test_malformed_faq_does_not_block_other_pages() {
    let stores = TestStores::new();
    stores
        .backend
        .seed_page("faq", json!("{\"hero\": {\"title\": "), true);
    stores
        .backend
        .seed_page("about", json!({"hero": {"title": "من نحن", "subtitle": "قصتنا"}}), true);
    stores.backend.seed_page(
        "contact",
        json!(r#"{"info": {"phone": "0100"}}"#),
        true,
    );

    let loaded = stores.pages.load().await.unwrap();
    assert_eq!(loaded, 2);

    assert_eq!(
        stores.pages.page_content("faq"),
        PageContent::default_for(PageKey::Faq).to_value()
    );
    assert_eq!(stores.pages.page_content("about")["hero"]["subtitle"], "قصتنا");
    assert_eq!(
        stores.pages.page_content("contact")["info"]["phone"],
        "0100"
    );
    assert_eq!(
        stores.pages.page_content("home"),
        PageContent::default_for(PageKey::Home).to_value()
    );
}

#[tokio::test]
async fn test_anonymous_page_write_is_rejected() {
    let stores = TestStores::new();

    let err = stores
        .pages
        .update_page_content(&None::<AdminUserId>, "home", json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Unauthenticated));
    assert_eq!(stores.backend.page_upserts(), 0);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_absent_settings_fall_back_to_defaults() {
    let stores = TestStores::new();
    stores.backend.seed_setting(keys::FOOTER_TEXT, json!("© كينشيب"));
    stores.load().await;

    assert_eq!(
        stores.settings.get(keys::PRIMARY_COLOR),
        default_setting(keys::PRIMARY_COLOR)
    );
    assert_eq!(stores.settings.get(keys::FOOTER_TEXT), Some(json!("© كينشيب")));
    assert_eq!(stores.settings.get("never_defined"), None);
}

#[tokio::test]
async fn test_failed_key_keeps_prior_value_and_sibling_saves() {
    let stores = TestStores::new();
    stores.backend.seed_setting("a", json!(0));
    stores.load().await;
    stores.backend.fail_upserts_for("a");

    let report = stores
        .settings
        .update(
            &ADMIN,
            BTreeMap::from([("a".to_string(), json!(1)), ("b".to_string(), json!(2))]),
        )
        .await
        .unwrap();

    assert_eq!(report.saved, vec!["b".to_string()]);
    assert_eq!(report.failed, vec!["a".to_string()]);
    assert_eq!(stores.settings.get("a"), Some(json!(0)));
    assert_eq!(stores.settings.get("b"), Some(json!(2)));
    assert_eq!(stores.backend.setting("b").unwrap().updated_by, Some(ADMIN));
}

#[tokio::test]
async fn test_anonymous_settings_write_is_rejected() {
    let stores = TestStores::new();

    let err = stores
        .settings
        .update(
            &None::<AdminUserId>,
            BTreeMap::from([(keys::SITE_NAME.to_string(), json!("x"))]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Unauthenticated));
    assert_eq!(stores.backend.setting_upserts(), 0);
}

#[tokio::test]
async fn test_failed_reload_keeps_last_snapshot() {
    let stores = TestStores::new();
    stores.backend.seed_setting(keys::SITE_LOGO, json!("/brand.png"));
    stores.load().await;

    stores.backend.fail_reads(true);
    assert!(stores.settings.load().await.is_err());
    assert!(stores.pages.load().await.is_err());

    assert_eq!(stores.settings.get(keys::SITE_LOGO), Some(json!("/brand.png")));
    assert_eq!(stores.settings.status(), SyncStatus::Ready);
}

#[tokio::test]
async fn test_settings_backup_written_after_update() {
    let dir = tempfile::tempdir().unwrap();
    let backup = Arc::new(FileBackup::new(dir.path()));
    let stores = TestStores::with_backup(backup.clone());
    stores.load().await;

    stores
        .settings
        .update(
            &ADMIN,
            BTreeMap::from([(keys::CONTACT_PHONE.to_string(), json!("01000000000"))]),
        )
        .await
        .unwrap();

    let saved = backup.read(BACKUP_KEY).await.unwrap().unwrap();
    assert_eq!(saved[keys::CONTACT_PHONE], "01000000000");
    assert_eq!(
        Some(saved[keys::PRIMARY_COLOR].clone()),
        default_setting(keys::PRIMARY_COLOR)
    );
}

// ============================================================================
// Change feed
// ============================================================================

#[tokio::test]
async fn test_change_notification_reloads_pages() {
    let stores = TestStores::new();
    stores.load().await;
    let feed = stores.backend.change_feed(Table::PagesContent);
    spawn_reload_on_change(stores.pages.clone(), Box::new(feed));
    let mut rx = stores.pages.subscribe();

    stores
        .backend
        .seed_page("faq", json!({"hero": {"title": "أسئلة"}}), true);
    stores.backend.notify(Table::PagesContent, ChangeKind::Insert);

    tokio::time::timeout(WAIT, rx.wait_for(|s| s.entries.contains_key("faq")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stores.pages.page_content("faq")["hero"]["title"], "أسئلة");
}

#[tokio::test]
async fn test_write_from_one_instance_reaches_another() {
    let stores = TestStores::new();
    let other = Arc::new(SettingsStore::new(stores.backend.clone(), Arc::new(NoBackup)));
    other.load().await.unwrap();
    let feed = stores.backend.change_feed(Table::SiteSettings);
    spawn_reload_on_change(other.clone(), Box::new(feed));
    let mut rx = other.subscribe();

    stores
        .settings
        .update(
            &ADMIN,
            BTreeMap::from([(keys::INTRO_VIDEO_ENABLED.to_string(), json!(true))]),
        )
        .await
        .unwrap();

    tokio::time::timeout(
        WAIT,
        rx.wait_for(|s| s.entries.get(keys::INTRO_VIDEO_ENABLED) == Some(&Value::Bool(true))),
    )
    .await
    .unwrap()
    .unwrap();
    assert!(other.site_settings().intro_video.enabled);
}
