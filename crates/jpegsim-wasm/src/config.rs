//! Compression settings bindings.
//!
//! Quality is held as the raw JS number and only narrowed once it has
//! passed the 1-100 range check.

use jpegsim_core::quant::validate_quality;
use jpegsim_core::CompressionConfig;
use wasm_bindgen::prelude::*;

/// Compression settings wrapper for JavaScript
#[wasm_bindgen]
pub struct JsCompressionConfig {
    quality: u32,
    workers: usize,
}

#[wasm_bindgen]
impl JsCompressionConfig {
    /// Create settings with the given quality (1-100)
    #[wasm_bindgen(constructor)]
    pub fn new(quality: u32) -> Self {
        Self {
            quality,
            workers: CompressionConfig::default().workers,
        }
    }

    /// Get quality value
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u32 {
        self.quality
    }

    /// Set quality value
    #[wasm_bindgen(setter)]
    pub fn set_quality(&mut self, value: u32) {
        self.quality = value;
    }

    /// Check the quality range without compressing anything
    pub fn is_valid(&self) -> bool {
        self.to_config().is_ok()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        let config = self
            .to_config()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        serde_wasm_bindgen::to_value(&config).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; missing fields take defaults
    pub fn from_json(value: JsValue) -> Result<JsCompressionConfig, JsValue> {
        let config: CompressionConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            quality: config.quality as u32,
            workers: config.workers,
        })
    }
}

impl Default for JsCompressionConfig {
    fn default() -> Self {
        Self::new(CompressionConfig::default().quality as u32)
    }
}

impl JsCompressionConfig {
    /// Range-checked core settings.
    pub(crate) fn to_config(&self) -> jpegsim_core::Result<CompressionConfig> {
        let quality = validate_quality(self.quality)?;
        Ok(CompressionConfig::new(quality).with_workers(self.workers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jpegsim_core::CompressError;

    #[test]
    fn test_config_accessors() {
        let mut config = JsCompressionConfig::new(80);
        assert_eq!(config.quality(), 80);
        assert!(config.is_valid());
        assert_eq!(config.to_config().unwrap().quality, 80);

        config.set_quality(0);
        assert!(!config.is_valid());
    }

    #[test]
    fn test_default_config() {
        let config = JsCompressionConfig::default();
        assert_eq!(config.quality(), 50);
        assert_eq!(config.to_config().unwrap(), CompressionConfig::default());
    }

    #[test]
    fn test_quality_above_u8_is_rejected_not_wrapped() {
        for quality in [256, 300, 356] {
            let config = JsCompressionConfig::new(quality);
            assert!(!config.is_valid());
            assert_eq!(
                config.to_config(),
                Err(CompressError::Config { quality })
            );
        }
    }
}
