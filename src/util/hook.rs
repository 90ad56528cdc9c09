use tracing::error;

use crate::ui::tui;

/// Leaves the alternate screen before the default hook prints the panic.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = tui::Tui::restore() {
            error!("failed to restore terminal: {e}");
        }
        error!("{panic_info}");
        hook(panic_info);
    }));
}
