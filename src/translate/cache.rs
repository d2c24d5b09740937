use anyhow::Result;
use std::cell::RefCell;
use std::collections::HashMap;

use super::Translator;

type CacheKey = (String, String, String);

/// Memoizes another translator. Errors are not cached.
pub struct CachedTranslator<T: Translator> {
    inner: T,
    cache: RefCell<HashMap<CacheKey, String>>,
}

impl<T: Translator> CachedTranslator<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<T: Translator> Translator for CachedTranslator<T> {
    fn translate(&self, text: &str, source_code: &str, target_code: &str) -> Result<String> {
        let key = (
            text.to_string(),
            source_code.to_string(),
            target_code.to_string(),
        );
        if let Some(hit) = self.cache.borrow().get(&key) {
            return Ok(hit.clone());
        }

        let translated = self.inner.translate(text, source_code, target_code)?;
        self.cache.borrow_mut().insert(key, translated.clone());
        Ok(translated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockTranslator;
    use anyhow::anyhow;

    #[test]
    fn test_repeated_text_is_translated_once() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .withf(|text, _, _| text == "Cancel")
            .times(1)
            .returning(|_, _, _| Ok("Cancelar".to_string()));
        inner
            .expect_translate()
            .withf(|text, _, _| text == "Accept")
            .times(1)
            .returning(|_, _, _| Ok("Aceptar".to_string()));

        let cached = CachedTranslator::new(inner);
        for _ in 0..3 {
            assert_eq!(cached.translate("Cancel", "en", "es").unwrap(), "Cancelar");
        }
        assert_eq!(cached.translate("Accept", "en", "es").unwrap(), "Aceptar");
        assert_eq!(cached.translate("Accept", "en", "es").unwrap(), "Aceptar");
    }

    #[test]
    fn test_cache_is_keyed_by_pair() {
        let mut inner = MockTranslator::new();
        inner
            .expect_translate()
            .times(2)
            .returning(|_, _, target| Ok(format!("[{}]", target)));

        let cached = CachedTranslator::new(inner);
        assert_eq!(cached.translate("Hello", "en", "es").unwrap(), "[es]");
        assert_eq!(cached.translate("Hello", "en", "fr").unwrap(), "[fr]");
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut inner = MockTranslator::new();
        let mut calls = 0;
        inner.expect_translate().times(2).returning(move |_, _, _| {
            calls += 1;
            if calls == 1 {
                Err(anyhow!("engine crashed"))
            } else {
                Ok("Hola".to_string())
            }
        });

        let cached = CachedTranslator::new(inner);
        assert!(cached.translate("Hello", "en", "es").is_err());
        assert_eq!(cached.translate("Hello", "en", "es").unwrap(), "Hola");
    }
}
