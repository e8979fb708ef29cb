//! Builders for `settings.xml` and `settings-security.xml` documents.

/// Fluent builder for a `settings.xml` document.
///
/// Sections are emitted in a fixed order and only when non-empty, so an
/// untouched builder renders `<settings></settings>`.
#[derive(Debug, Clone, Default)]
pub struct SettingsXml {
    local_repository: Option<String>,
    servers: Vec<String>,
    mirrors: Vec<String>,
    proxies: Vec<String>,
    profiles: Vec<String>,
    active_profiles: Vec<String>,
}

impl SettingsXml {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn local_repository(mut self, path: &str) -> Self {
        self.local_repository = Some(path.to_string());
        self
    }

    /// Add a `<server>`; `None` leaves the element out.
    pub fn server(mut self, id: &str, username: Option<&str>, password: Option<&str>) -> Self {
        let mut server = format!("<server>{}", element("id", id));
        if let Some(username) = username {
            server.push_str(&element("username", username));
        }
        if let Some(password) = password {
            server.push_str(&element("password", password));
        }
        server.push_str("</server>");
        self.servers.push(server);
        self
    }

    pub fn mirror(mut self, id: &str, url: &str, mirror_of: &str) -> Self {
        self.mirrors.push(format!(
            "<mirror>{}{}{}</mirror>",
            element("id", id),
            element("url", url),
            element("mirrorOf", mirror_of)
        ));
        self
    }

    pub fn proxy(mut self, id: &str, host: &str, port: u16, active: bool) -> Self {
        self.proxies.push(format!(
            "<proxy>{}{}{}{}</proxy>",
            element("id", id),
            element("active", &active.to_string()),
            element("host", host),
            element("port", &port.to_string())
        ));
        self
    }

    /// Add a `<profile>` with `(id, url)` repository declarations.
    pub fn profile(mut self, id: &str, repositories: &[(&str, &str)]) -> Self {
        let repositories: String = repositories
            .iter()
            .map(|(repo_id, url)| {
                format!(
                    "<repository>{}{}</repository>",
                    element("id", repo_id),
                    element("url", url)
                )
            })
            .collect();
        self.profiles.push(format!(
            "<profile>{}<repositories>{repositories}</repositories></profile>",
            element("id", id)
        ));
        self
    }

    pub fn active_profile(mut self, id: &str) -> Self {
        self.active_profiles.push(element("activeProfile", id));
        self
    }

    /// Render the document.
    pub fn build(&self) -> String {
        let mut out = String::from("<settings>\n");
        if let Some(path) = &self.local_repository {
            out.push_str(&format!("  {}\n", element("localRepository", path)));
        }
        section(&mut out, "servers", &self.servers);
        section(&mut out, "mirrors", &self.mirrors);
        section(&mut out, "proxies", &self.proxies);
        section(&mut out, "profiles", &self.profiles);
        section(&mut out, "activeProfiles", &self.active_profiles);
        out.push_str("</settings>\n");
        out
    }
}

/// Render a `settings-security.xml` document.
pub fn security_xml(master: Option<&str>, relocation: Option<&str>) -> String {
    let mut out = String::from("<settingsSecurity>");
    if let Some(master) = master {
        out.push_str(&element("master", master));
    }
    if let Some(relocation) = relocation {
        out.push_str(&element("relocation", relocation));
    }
    out.push_str("</settingsSecurity>");
    out
}

fn section(out: &mut String, name: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("  <{name}>\n"));
    for item in items {
        out.push_str(&format!("    {item}\n"));
    }
    out.push_str(&format!("  </{name}>\n"));
}

fn element(name: &str, value: &str) -> String {
    format!("<{name}>{}</{name}>", escape(value))
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_renders_bare_root() {
        assert_eq!(SettingsXml::new().build(), "<settings>\n</settings>\n");
    }

    #[test]
    fn values_are_escaped() {
        let xml = SettingsXml::new()
            .server("corp", Some("a&b"), None)
            .build();
        assert!(xml.contains("<username>a&amp;b</username>"), "{xml}");
    }

    #[test]
    fn security_document_contains_master() {
        let xml = security_xml(Some("{abc=}"), None);
        assert_eq!(
            xml,
            "<settingsSecurity><master>{abc=}</master></settingsSecurity>"
        );
    }
}
