//! Scenario tests across the whole resolution pipeline
//!
//! Each test writes real settings documents to a temporary directory and
//! resolves them the way a build tool integration would.

use m2_crypto::{Decryptor, encrypt_master};
use m2_resolve::{BoundRepository, Credentials, Error, RepositorySink, Resolver, SettingsPaths};
use m2_settings::Proxy;
use m2_test_utils::{SettingsXml, TestDir};
use pretty_assertions::assert_eq;

const REPO_URL: &str = "https://repo.mycompany.com/maven2";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// A sink that records everything the binder reports
#[derive(Default)]
struct RecordingSink {
    proxies: Vec<(String, u16)>,
    repositories: Vec<BoundRepository>,
}

impl RepositorySink for RecordingSink {
    fn register(&mut self, repository: BoundRepository) {
        self.repositories.push(repository);
    }

    fn report_proxy(&mut self, proxy: &Proxy) {
        self.proxies.push((proxy.host.clone(), proxy.port));
    }
}

struct Workspace {
    dir: TestDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: TestDir::new() }
    }

    fn user(&self, settings: &SettingsXml) -> &Self {
        self.dir.write_settings(".m2/settings.xml", settings);
        self
    }

    fn global(&self, settings: &SettingsXml) -> &Self {
        self.dir.write_settings("maven/conf/settings.xml", settings);
        self
    }

    fn paths(&self) -> SettingsPaths {
        SettingsPaths::new()
            .global(self.dir.path("maven/conf/settings.xml"))
            .with_home(self.dir.root())
    }

    fn resolve(&self) -> Result<Vec<BoundRepository>, Error> {
        Resolver::new(self.paths()).resolve()
    }
}

fn my_profile() -> SettingsXml {
    SettingsXml::new()
        .profile("my-profile", &[("my-repo", REPO_URL)])
        .active_profile("my-profile")
}

// =============================================================================
// Scenario 1-4
// =============================================================================

#[test]
fn scenario_plain_repository_is_anonymous() {
    let ws = Workspace::new();
    ws.user(&my_profile());

    assert_eq!(
        ws.resolve().unwrap(),
        vec![BoundRepository::anonymous("my-repo", REPO_URL)]
    );
}

#[test]
fn scenario_catch_all_mirror_redirects() {
    let ws = Workspace::new();
    ws.user(&my_profile().mirror("central-mirror", "https://mirror.example.com", "*"));

    let bound = ws.resolve().unwrap();

    assert_eq!(bound.len(), 1);
    assert_eq!(bound[0].name, "central-mirror");
    assert_eq!(bound[0].url, "https://mirror.example.com");
    assert_eq!(bound[0].credentials, None);
}

#[test]
fn scenario_server_supplies_plain_credentials() {
    let ws = Workspace::new();
    ws.user(&my_profile().server("my-repo", Some("user"), Some("plainpass")));

    let bound = ws.resolve().unwrap();

    assert_eq!(
        bound[0].credentials,
        Some(Credentials {
            username: Some("user".to_string()),
            password: Some("plainpass".to_string()),
        })
    );
}

#[test]
fn scenario_malformed_user_settings_is_fatal() {
    let ws = Workspace::new();
    ws.dir.write(".m2/settings.xml", "<settings><unclosedTag>");

    let mut sink = RecordingSink::default();
    let result = Resolver::new(ws.paths()).resolve_into(&mut sink);

    assert!(matches!(
        result,
        Err(Error::Settings(m2_settings::Error::Parse { .. }))
    ));
    assert!(sink.repositories.is_empty());
}

// =============================================================================
// Layered settings
// =============================================================================

#[test]
fn global_mirror_and_user_server_combine() {
    let ws = Workspace::new();
    ws.global(&SettingsXml::new().mirror("corp", "https://nexus.corp/all", "*,!snapshots"));
    ws.user(
        &SettingsXml::new()
            .profile(
                "dev",
                &[
                    ("central", "https://repo.maven.apache.org/maven2"),
                    ("snapshots", "https://snapshots.example"),
                ],
            )
            .active_profile("dev")
            .server("corp", Some("ci"), Some("token")),
    );

    let bound = ws.resolve().unwrap();

    let summary: Vec<_> = bound
        .iter()
        .map(|r| (r.name.as_str(), r.url.as_str(), r.is_authenticated()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("corp", "https://nexus.corp/all", true),
            ("corp", "https://nexus.corp/all", true),
        ]
    );
}

#[test]
fn exclusion_before_wildcard_keeps_repository_direct() {
    let ws = Workspace::new();
    ws.global(&SettingsXml::new().mirror("corp", "https://nexus.corp/all", "!snapshots,*"));
    ws.user(
        &SettingsXml::new()
            .profile(
                "dev",
                &[
                    ("central", "https://repo.maven.apache.org/maven2"),
                    ("snapshots", "https://snapshots.example"),
                ],
            )
            .active_profile("dev"),
    );

    let bound = ws.resolve().unwrap();

    assert_eq!(bound[0].name, "corp");
    assert_eq!(bound[1], BoundRepository::anonymous("snapshots", "https://snapshots.example"));
}

#[test]
fn user_mirror_shadows_global_mirror_with_same_id() {
    let ws = Workspace::new();
    ws.global(&SettingsXml::new().mirror("corp", "https://global.corp", "*"));
    ws.user(&my_profile().mirror("corp", "https://user.corp", "*"));

    assert_eq!(ws.resolve().unwrap()[0].url, "https://user.corp");
}

#[test]
fn unknown_active_profile_does_not_stop_resolution() {
    let ws = Workspace::new();
    ws.user(&my_profile().active_profile("does-not-exist"));

    assert_eq!(ws.resolve().unwrap().len(), 1);
}

// =============================================================================
// Passwords
// =============================================================================

#[test]
fn relocated_master_decrypts_server_password() {
    let ws = Workspace::new();
    let real = ws
        .dir
        .write_security("usb/settings-security.xml", &encrypt_master("m4ster"));
    ws.dir.write_relocation(".m2/settings-security.xml", &real);
    let token = Decryptor::with_master_password("m4ster")
        .encrypt("s3cret")
        .unwrap();
    ws.user(&my_profile().server("my-repo", Some("user"), Some(token.as_str())));

    let bound = ws.resolve().unwrap();

    let password = bound[0].credentials.as_ref().unwrap().password.as_deref();
    assert_eq!(password, Some("s3cret"));
}

#[test]
fn maven_encrypted_password_resolves_to_plaintext() {
    let ws = Workspace::new();
    ws.dir.write_security(
        ".m2/settings-security.xml",
        "{1wQaa6S/o8MH7FnaTNL53XmhT5O0SEGXQi3gC49o6OY=}",
    );
    ws.user(&my_profile().server(
        "my-repo",
        Some("deployer"),
        Some("{BteqUEnqHecHM7MZfnj9FwLcYbdInWxou1C929Txa0A=}"),
    ));

    let bound = ws.resolve().unwrap();

    assert_eq!(
        bound[0].credentials,
        Some(Credentials {
            username: Some("deployer".to_string()),
            password: Some("testtest".to_string()),
        })
    );
}

#[test]
fn decryption_failure_keeps_sibling_repositories_intact() {
    let ws = Workspace::new();
    let good = Decryptor::default().encrypt("good-secret").unwrap();
    ws.user(
        &SettingsXml::new()
            .profile("p", &[("broken", "https://a.example"), ("fine", "https://b.example")])
            .active_profile("p")
            .server("broken", Some("u"), Some("{input_is_already_encrypted_mock}"))
            .server("fine", Some("u"), Some(good.as_str())),
    );

    let bound = ws.resolve().unwrap();

    let passwords: Vec<_> = bound
        .iter()
        .map(|r| r.credentials.as_ref().unwrap().password.clone().unwrap())
        .collect();
    assert_eq!(
        passwords,
        ["{input_is_already_encrypted_mock}", "good-secret"]
    );
}

// =============================================================================
// Proxy
// =============================================================================

#[test]
fn active_proxy_is_reported_once() {
    let ws = Workspace::new();
    ws.user(
        &my_profile()
            .proxy("off", "off.example", 3128, false)
            .proxy("on", "proxy.example", 8888, true),
    );

    let mut sink = RecordingSink::default();
    Resolver::new(ws.paths()).resolve_into(&mut sink).unwrap();

    assert_eq!(sink.proxies, vec![("proxy.example".to_string(), 8888)]);
    assert_eq!(sink.repositories.len(), 1);
}
