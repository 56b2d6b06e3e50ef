//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the editor shortcuts
/// - macOS: SUPER (Cmd key), Ctrl is accepted as well
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const COMMAND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Save shortcut display
/// Ctrl+S works on all platforms
pub const SAVE_SHORTCUT: &str = "Ctrl+S";

/// Copy form shortcut display
/// - macOS: "Cmd+D"
/// - Linux/Windows: "Ctrl+D"
#[cfg(target_os = "macos")]
pub const COPY_FORM_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const COPY_FORM_SHORTCUT: &str = "Ctrl+D";

/// Reload shortcut display
#[cfg(target_os = "macos")]
pub const RELOAD_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RELOAD_SHORTCUT: &str = "Ctrl+R";

/// Whether `modifiers` hold the command modifier (Ctrl always counts)
pub fn is_command(modifiers: KeyModifiers) -> bool {
    modifiers.contains(COMMAND_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}
