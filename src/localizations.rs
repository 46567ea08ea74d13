use std::collections::HashMap;

// Simple in-memory translations
#[derive(Default)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Translations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: &'static str) {
        self.strings.insert(key, value);
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.strings.get(key).copied()
    }
}

pub struct Localizations {
    translations: HashMap<&'static str, Translations>,
    current_lang: &'static str,
}

impl Default for Localizations {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizations {
    pub fn new() -> Self {
        let lang = std::env::var("LANG").unwrap_or_default();
        Self::for_language(&lang)
    }

    pub fn for_language(lang: &str) -> Self {
        let mut translations = HashMap::new();

        let mut en = Translations::new();
        en.insert("app-title", "yt-dlp Audio Downloader");
        en.insert("url-label", "URL (YouTube / YouTube Music):");
        en.insert("url-placeholder", "https://www.youtube.com/watch?v=...");
        en.insert("format-label", "Output format:");
        en.insert("format-mp3_320", "MP3 320 kbps");
        en.insert("format-aac", "AAC");
        en.insert("format-opus", "Opus (no conversion)");
        en.insert("output-dir-label", "Output folder:");
        en.insert("browse-button", "Choose...");
        en.insert("download-button", "Download audio");
        en.insert("stop-button", "Stop");
        en.insert("log-label", "Log:");
        en.insert("stopping", "Stopping download...");
        en.insert("finished", "Finished");
        en.insert("finished-stopped", "stopped");
        en.insert("spawn-error", "Error launching yt-dlp");
        en.insert("missing-url-title", "Missing URL");
        en.insert("missing-url", "Enter a YouTube or YouTube Music URL.");
        en.insert("invalid-url-title", "Invalid URL");
        en.insert("invalid-url", "Only http:// or https:// URLs are accepted.");
        en.insert("busy-title", "In progress");
        en.insert("busy", "A download is already in progress.");
        en.insert("dir-error-title", "Output folder");
        en.insert("dir-error", "Could not create the output folder");
        en.insert("no-python-title", "Python not found");
        en.insert("no-python", "No Python interpreter with yt-dlp was found. Set YTDLP_GUI_PYTHON.");
        translations.insert("en-US", en);

        let mut es = Translations::new();
        es.insert("app-title", "Descargador de audio yt-dlp");
        es.insert("url-label", "URL (YouTube / YouTube Music):");
        es.insert("format-label", "Formato de salida:");
        es.insert("format-opus", "Opus (sin conversión)");
        es.insert("output-dir-label", "Carpeta de salida:");
        es.insert("browse-button", "Elegir...");
        es.insert("download-button", "Descargar audio");
        es.insert("stop-button", "Detener");
        es.insert("stopping", "Deteniendo descarga...");
        es.insert("finished", "Finalizado");
        es.insert("finished-stopped", "detenido");
        es.insert("spawn-error", "Error lanzando yt-dlp");
        es.insert("missing-url-title", "Falta URL");
        es.insert("missing-url", "Introduce una URL de YouTube o YouTube Music.");
        es.insert("invalid-url-title", "URL no válida");
        es.insert("invalid-url", "Solo se aceptan URLs http:// o https://.");
        es.insert("busy-title", "En progreso");
        es.insert("busy", "Ya hay una descarga en curso.");
        es.insert("dir-error-title", "Carpeta de salida");
        es.insert("dir-error", "No se pudo crear la carpeta de salida");
        es.insert("no-python-title", "Python no encontrado");
        es.insert("no-python", "No se encontró un intérprete de Python con yt-dlp. Define YTDLP_GUI_PYTHON.");
        translations.insert("es-ES", es);

        let current_lang = if lang.to_lowercase().starts_with("es") {
            "es-ES"
        } else {
            "en-US"
        };

        Self {
            translations,
            current_lang,
        }
    }

    pub fn current_language(&self) -> &'static str {
        self.current_lang
    }

    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.translations
            .get(self.current_lang)
            .and_then(|t| t.lookup(key))
            .or_else(|| {
                // Fallback to English if the current language doesn't have the key
                self.translations.get("en-US").and_then(|t| t.lookup(key))
            })
    }

    /// Like `lookup`, but never fails: unknown keys come back as the key itself.
    pub fn text(&self, key: &'static str) -> &'static str {
        self.lookup(key).unwrap_or(key)
    }
}
