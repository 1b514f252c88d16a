pub mod config;
pub mod feed;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Registers every shell command; help lists them in this order.
pub fn register_all(registry: &mut CommandRegistry) {
    for entry in feed::definitions()
        .into_iter()
        .chain(config::definitions())
        .chain(system::definitions())
    {
        registry.register(entry);
    }
}
