//! Tests for loading and merging settings files

use m2_settings::{Error, Interpolator, Mirror, Settings, SettingsMerger};
use m2_test_utils::{SettingsXml, TestDir};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

fn merger() -> SettingsMerger {
    SettingsMerger::with_interpolator(Interpolator::none())
}

mod single_file {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_user_settings_only() {
        let dir = TestDir::new();
        let user = dir.write(
            "user-settings.xml",
            "<settings><localRepository>/tmp/user-repo</localRepository></settings>",
        );

        let settings = merger().merge(Some(&user), None).unwrap();

        assert_eq!(settings.local_repository.as_deref(), Some("/tmp/user-repo"));
    }

    #[test]
    fn test_global_settings_only() {
        let dir = TestDir::new();
        let global = dir.write(
            "global-settings.xml",
            "<settings><localRepository>/tmp/global-repo</localRepository></settings>",
        );

        let settings = merger().merge(None, Some(&global)).unwrap();

        assert_eq!(settings.local_repository.as_deref(), Some("/tmp/global-repo"));
    }

    #[test]
    fn test_single_document_is_used_verbatim() {
        let dir = TestDir::new();
        let xml = SettingsXml::new()
            .server("corp", Some("deploy"), Some("pw"))
            .mirror("m", "https://mirror.example", "*")
            .profile("p", &[("r", "https://r.example")])
            .active_profile("p");
        let path = dir.write_settings("settings.xml", &xml);

        let loaded = merger().load(&path).unwrap().unwrap();
        let as_user = merger().merge(Some(&path), None).unwrap();
        let as_global = merger().merge(None, Some(&path)).unwrap();

        assert_eq!(as_user, loaded);
        assert_eq!(as_global, loaded);
    }

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = TestDir::new();
        assert!(merger().load(&dir.path("absent.xml")).unwrap().is_none());
    }

    #[test]
    fn test_directory_path_is_treated_as_absent() {
        let dir = TestDir::new();
        let settings = merger().merge(Some(dir.root()), None).unwrap();
        assert!(settings.is_empty());
    }
}

mod precedence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_both_files_user_precedence() {
        let dir = TestDir::new();
        let user = dir.write(
            "user.xml",
            "<settings><localRepository>/tmp/user-repo</localRepository></settings>",
        );
        let global = dir.write(
            "global.xml",
            "<settings><localRepository>/tmp/global-repo</localRepository></settings>",
        );

        let settings = merger().merge(Some(&user), Some(&global)).unwrap();

        assert_eq!(settings.local_repository.as_deref(), Some("/tmp/user-repo"));
    }

    #[test]
    fn test_collections_merge_by_id() {
        let dir = TestDir::new();
        let user = dir.write_settings(
            "user.xml",
            &SettingsXml::new()
                .mirror("shared", "https://user-mirror.example", "central")
                .server("user-only", Some("u"), None)
                .active_profile("user-profile"),
        );
        let global = dir.write_settings(
            "global.xml",
            &SettingsXml::new()
                .mirror("shared", "https://global-mirror.example", "*")
                .mirror("global-only", "https://other.example", "snapshots")
                .server("global-only", Some("g"), None)
                .profile("global-profile", &[("r", "https://r.example")])
                .active_profile("global-profile"),
        );

        let settings = merger().merge(Some(&user), Some(&global)).unwrap();

        assert_eq!(
            settings.mirrors,
            vec![
                Mirror::new("shared", "https://user-mirror.example", "central"),
                Mirror::new("global-only", "https://other.example", "snapshots"),
            ]
        );
        let server_ids: Vec<_> = settings.servers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(server_ids, vec!["user-only", "global-only"]);
        assert!(settings.profile("global-profile").is_some());
        assert_eq!(settings.active_profiles, vec!["user-profile", "global-profile"]);
    }

    #[test]
    fn test_non_existent_files() {
        let dir = TestDir::new();
        let settings = merger()
            .merge(
                Some(&dir.path("non-existent-user.xml")),
                Some(&dir.path("non-existent-global.xml")),
            )
            .unwrap();
        assert_eq!(settings, Settings::empty());
    }

    #[test]
    fn test_null_files() {
        assert_eq!(merger().merge(None, None).unwrap(), Settings::empty());
    }
}

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_invalid_user_xml() {
        let dir = TestDir::new();
        let invalid = dir.write("invalid.xml", "<settings><unclosedTag>");

        let err = merger().merge(Some(&invalid), None).unwrap_err();

        assert!(matches!(err, Error::Parse { .. }), "unexpected error: {err}");
        assert_eq!(err.path(), invalid.as_path());
        assert!(err.to_string().contains("invalid.xml"), "{err}");
    }

    #[test]
    fn test_invalid_global_xml_fails_even_with_valid_user() {
        let dir = TestDir::new();
        let user = dir.write_settings("user.xml", &SettingsXml::new().local_repository("/x"));
        let global = dir.write("global.xml", "<settings><servers><server></settings>");

        let err = merger().merge(Some(&user), Some(&global)).unwrap_err();

        assert_eq!(err.path(), global.as_path());
    }

    #[test]
    fn test_missing_repository_url_is_invalid() {
        let dir = TestDir::new();
        let path = dir.write(
            "settings.xml",
            "<settings><profiles><profile><id>p</id><repositories><repository><id>r</id></repository></repositories></profile></profiles></settings>",
        );

        let err = merger().merge(Some(&path), None).unwrap_err();

        assert!(matches!(err, Error::Invalid { .. }), "unexpected error: {err}");
    }
}

#[test]
fn test_interpolation_applies_to_loaded_files() {
    let dir = TestDir::new();
    let path = dir.write_settings(
        "settings.xml",
        &SettingsXml::new().local_repository("${user.home}/.m2/repository"),
    );
    let merger = SettingsMerger::with_interpolator(Interpolator::with_properties(HashMap::from([(
        "user.home".to_string(),
        "/home/ci".to_string(),
    )])));

    let settings = merger.merge(Some(&path), None).unwrap();

    assert_eq!(
        settings.local_repository.as_deref(),
        Some("/home/ci/.m2/repository")
    );
}
