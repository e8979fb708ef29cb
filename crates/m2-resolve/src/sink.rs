//! Destination for bound repositories

use m2_settings::Proxy;

use crate::binder::BoundRepository;

/// Receives the output of a binding pass
///
/// Build tools implement this to register repositories with their own
/// resolver; `Vec<BoundRepository>` collects them for inspection.
pub trait RepositorySink {
    /// Called once per bound repository, in binding order
    fn register(&mut self, repository: BoundRepository);

    /// Called once, before any repository, when settings declare an active proxy
    fn report_proxy(&mut self, _proxy: &Proxy) {}
}

impl RepositorySink for Vec<BoundRepository> {
    fn register(&mut self, repository: BoundRepository) {
        self.push(repository);
    }
}
