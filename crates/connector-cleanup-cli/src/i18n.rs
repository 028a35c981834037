// crates/connector-cleanup-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the cleanup CLI.
// Purpose: Route every operator-facing string through one localized catalog.
// Dependencies: Standard library collections and synchronization.
// ============================================================================

//! ## Overview
//! Operator-facing text (menus, prompts, notices, the closing summary) lives
//! in per-locale catalogs and is rendered through the [`t!`](crate::t)
//! macro. Log records emitted through `tracing` are not localized.
//!
//! ## Invariants
//! - The locale is chosen once per process and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale value, ignoring case and region tags.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ca") => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Supported CLI locales in presentation order.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A named placeholder value captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces.
    pub key: &'static str,
    /// Preformatted substitution value.
    pub value: String,
}

impl MessageArg {
    /// Builds an argument from a placeholder name and value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen for this process.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (English until set).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog.
const CATALOG_EN: &[(&str, &str)] = &[
    ("config.failed", "Configuration error: {error}"),
    ("client.failed", "Could not create the management API client: {error}"),
    ("assets.none_found", "No assets found on the provider to manage."),
    ("select.header", "Available assets for deletion:"),
    ("select.item", "  {index}. ID: {id} (Name: {name})"),
    (
        "select.prompt",
        "Select assets to delete by number (e.g., 1,3,5), 'A' for All, 'N' for None, then press \
         Enter: ",
    ),
    (
        "select.empty_input",
        "No assets selected. Type 'N' if you want to select none, or provide numbers.",
    ),
    ("select.all", "All {count} assets selected."),
    ("select.none", "No assets selected."),
    ("select.out_of_range", "Invalid selection: '{part}'. Number out of range."),
    ("select.invalid", "Invalid input. Please enter numbers, 'A', or 'N'."),
    ("select.current.header", "Currently selected for deletion:"),
    ("select.current.item", "  - {id}"),
    ("select.current.empty", "No assets currently selected."),
    ("select.cancelled", "Selection cancelled by user."),
    ("select.nothing_selected", "No assets were selected for deletion."),
    ("confirm.header", "The following assets are selected for DELETION:"),
    ("confirm.item", "  - ID: {id} (Name: {name})"),
    (
        "confirm.prompt",
        "Are you sure you want to delete these assets (and their directly related contract \
         definitions AND contract agreements)? This action CANNOT be undone. (yes/no): ",
    ),
    ("confirm.cancelled", "Deletion cancelled by user."),
    ("summary.header", "--- Deletion Summary ---"),
    ("summary.assets.deleted", "Successfully deleted: {count} asset(s)"),
    ("summary.assets.failed", "Failed to delete: {count} asset(s)"),
    ("summary.definitions.deleted", "Successfully deleted: {count} contract definition(s)"),
    ("summary.definitions.failed", "Failed to delete: {count} contract definition(s)"),
    ("summary.agreements.deleted", "Successfully deleted: {count} contract agreement(s)"),
    ("summary.agreements.failed", "Failed to delete: {count} contract agreement(s)"),
    ("summary.finished", "Asset cleanup process finished."),
    (
        "summary.note.scope",
        "Note: this tool deletes the selected assets, the contract definitions targeting them, \
         and their contract agreements.",
    ),
    (
        "summary.note.remaining",
        "Assets referenced by contract agreements that could not be deleted (for example when \
         the connector answers 405 Method Not Allowed) remain on the provider.",
    ),
    ("summary.encode_failed", "Failed to encode the summary as JSON: {error}"),
    ("terminal.io_failed", "Terminal input/output failed: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("logging.init_failed", "Failed to initialize logging: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Catalan catalog.
const CATALOG_CA: &[(&str, &str)] = &[
    ("config.failed", "Error de configuració: {error}"),
    ("client.failed", "No s'ha pogut crear el client de l'API de gestió: {error}"),
    ("assets.none_found", "No s'han trobat actius al proveïdor per gestionar."),
    ("select.header", "Actius disponibles per eliminar:"),
    ("select.item", "  {index}. ID: {id} (Nom: {name})"),
    (
        "select.prompt",
        "Seleccioneu els actius a eliminar per número (p. ex., 1,3,5), 'A' per a tots, 'N' per a \
         cap, i premeu Retorn: ",
    ),
    (
        "select.empty_input",
        "No s'ha seleccionat cap actiu. Escriviu 'N' si no en voleu seleccionar cap, o indiqueu \
         números.",
    ),
    ("select.all", "S'han seleccionat tots els {count} actius."),
    ("select.none", "No s'ha seleccionat cap actiu."),
    ("select.out_of_range", "Selecció no vàlida: '{part}'. Número fora de rang."),
    ("select.invalid", "Entrada no vàlida. Introduïu números, 'A' o 'N'."),
    ("select.current.header", "Seleccionats actualment per eliminar:"),
    ("select.current.item", "  - {id}"),
    ("select.current.empty", "No hi ha cap actiu seleccionat actualment."),
    ("select.cancelled", "Selecció cancel·lada per l'usuari."),
    ("select.nothing_selected", "No s'ha seleccionat cap actiu per eliminar."),
    ("confirm.header", "Els actius següents estan seleccionats per ELIMINAR:"),
    ("confirm.item", "  - ID: {id} (Nom: {name})"),
    (
        "confirm.prompt",
        "Segur que voleu eliminar aquests actius (i les seves definicions de contracte I acords \
         de contracte relacionats)? Aquesta acció NO es pot desfer. (yes/no): ",
    ),
    ("confirm.cancelled", "Eliminació cancel·lada per l'usuari."),
    ("summary.header", "--- Resum de l'eliminació ---"),
    ("summary.assets.deleted", "Eliminats correctament: {count} actiu(s)"),
    ("summary.assets.failed", "No s'han pogut eliminar: {count} actiu(s)"),
    ("summary.definitions.deleted", "Eliminades correctament: {count} definició(ns) de contracte"),
    ("summary.definitions.failed", "No s'han pogut eliminar: {count} definició(ns) de contracte"),
    ("summary.agreements.deleted", "Eliminats correctament: {count} acord(s) de contracte"),
    ("summary.agreements.failed", "No s'han pogut eliminar: {count} acord(s) de contracte"),
    ("summary.finished", "Procés de neteja d'actius finalitzat."),
    (
        "summary.note.scope",
        "Nota: aquesta eina elimina els actius seleccionats, les definicions de contracte que els \
         apunten i els seus acords de contracte.",
    ),
    (
        "summary.note.remaining",
        "Els actius referenciats per acords de contracte que no s'han pogut eliminar (per \
         exemple quan el connector respon 405 Method Not Allowed) es mantenen al proveïdor.",
    ),
    ("summary.encode_failed", "No s'ha pogut codificar el resum com a JSON: {error}"),
    ("terminal.io_failed", "Ha fallat l'entrada/sortida del terminal: {error}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("logging.init_failed", "No s'ha pogut inicialitzar el registre: {error}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the raw catalog entries for a locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let map = match locale {
        Locale::En => &CATALOG_EN_MAP,
        Locale::Ca => &CATALOG_CA_MAP,
    };
    map.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` in the current locale, substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(current_locale())
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }
    substitute(template, &args)
}

/// Replaces `{name}` placeholders in one pass over the template.
///
/// Substituted values are never rescanned, so a value that itself looks like
/// a placeholder is emitted verbatim. Unknown placeholders stay literal.
fn substitute(template: &str, args: &[MessageArg]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        result.push_str(&rest[.. start]);
        let after = &rest[start + 1 ..];
        let Some(end) = after.find('}') else {
            result.push_str(&rest[start ..]);
            return result;
        };
        let name = &after[.. end];
        match args.iter().find(|arg| arg.key == name) {
            Some(arg) => result.push_str(&arg.value),
            None => {
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        rest = &after[end + 1 ..];
    }
    result.push_str(rest);
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
