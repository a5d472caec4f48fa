/// SessionProvider port for the authenticated control-plane session
///
/// The session is owned by the platform CLI; this tool only asks whether
/// one is usable before making any network call.
pub trait SessionProvider: Send + Sync {
    /// Returns true if an API endpoint and access token are available
    fn is_authenticated(&self) -> bool;
}
