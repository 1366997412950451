use log::{debug, warn};
use serde_json::Value;
use std::{collections::HashMap, fs, path::Path};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Lang {
    En,
    Fil,
}

impl Lang {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "fil" | "tl" => Self::Fil,
            _ => Self::En,
        }
    }

    fn folder(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Fil => "fil",
        }
    }
}

fn load_message_file(dir: &Path, lang: Lang, namespace: Namespace) -> Value {
    let file_path = dir
        .join(lang.folder())
        .join(format!("{}.json", namespace.as_str()));

    match fs::read_to_string(&file_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(json) => {
                debug!("Loaded messages from {:?}", file_path);
                json
            }
            Err(err) => {
                warn!("Failed to parse JSON from {:?}: {}", file_path, err);
                Value::Null
            }
        },
        Err(err) => {
            warn!("Failed to read file {:?}: {}", file_path, err);
            Value::Null
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Namespace {
    Validation,
    List,
}

impl Namespace {
    fn as_str(&self) -> &'static str {
        match self {
            Namespace::Validation => "validation",
            Namespace::List => "list",
        }
    }
}

/// Localised message tables for one language. Missing keys fall back to the
/// English text supplied at the call site.
#[derive(Debug, Clone)]
pub struct Messages {
    pub validation: Value,
    pub list: Value,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            validation: Value::Null,
            list: Value::Null,
        }
    }
}

impl Messages {
    pub fn load(dir: &Path, lang: Lang) -> Self {
        Self {
            validation: load_message_file(dir, lang, Namespace::Validation),
            list: load_message_file(dir, lang, Namespace::List),
        }
    }

    pub fn get(&self, namespace: Namespace, path: &str) -> Option<&Value> {
        let root = match namespace {
            Namespace::Validation => &self.validation,
            Namespace::List => &self.list,
        };

        path.split('.').try_fold(root, |current, key| current.get(key))
    }

    pub fn get_str(&self, namespace: Namespace, path: &str, fallback: &str) -> String {
        let result = self
            .get(namespace, path)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string();

        debug!("Accessed message [{}::{}]: {}", namespace.as_str(), path, result);
        result
    }

    pub fn get_validation_message(&self, path: &str, fallback: &str) -> String {
        self.get_str(Namespace::Validation, path, fallback)
    }

    pub fn get_list_message(&self, path: &str, fallback: &str) -> String {
        self.get_str(Namespace::List, path, fallback)
    }
}

/// Every supported language's messages, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    by_lang: HashMap<Lang, Messages>,
    fallback: Messages,
}

impl MessageCatalog {
    pub fn load(dir: &Path) -> Self {
        let by_lang = Lang::iter()
            .map(|lang| (lang, Messages::load(dir, lang)))
            .collect();
        Self {
            by_lang,
            fallback: Messages::default(),
        }
    }

    pub fn get(&self, lang: Lang) -> &Messages {
        self.by_lang.get(&lang).unwrap_or(&self.fallback)
    }
}

pub fn get_lang(req: &actix_web::HttpRequest) -> Lang {
    req.headers()
        .get("Accept-Language")
        .and_then(|value| value.to_str().ok())
        .and_then(|header| {
            header
                .split(',')
                .next()
                .and_then(|tag| tag.split(['-', ';']).next())
        })
        .map(Lang::from_code)
        .unwrap_or(Lang::En)
}
