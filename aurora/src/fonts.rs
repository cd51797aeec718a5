//! Font registry shared by every view.

use std::path::Path;

use aurora_vg::{Canvas, FontId};

/// Fonts the toolkit knows about. Missing fonts stay `None`; views fall back
/// to whatever the canvas does without a font.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontStash {
    pub regular: Option<FontId>,
    pub korean: Option<FontId>,
    pub material: Option<FontId>,
    pub shared_symbols: Option<FontId>,
}

impl FontStash {
    /// Load the desktop fonts from `asset_dir`. Fonts already provided by
    /// the platform are kept.
    pub fn load_assets(&mut self, canvas: &mut dyn Canvas, asset_dir: &Path) {
        if self.regular.is_none() {
            let illegal = asset_dir.join("Illegal-Font.ttf");
            let regular = if illegal.is_file() {
                illegal
            } else {
                asset_dir.join("inter").join("Inter-Switch.ttf")
            };
            self.regular = canvas.create_font("regular", &regular);
            if self.regular.is_none() {
                log::error!("[fonts] regular font {} not found", regular.display());
            }
        }

        if self.shared_symbols.is_none() {
            let wingdings = asset_dir.join("Wingdings.ttf");
            if wingdings.is_file() {
                self.shared_symbols = canvas.create_font("sharedSymbols", &wingdings);
            }
        }

        if self.material.is_none() {
            let material = asset_dir.join("material").join("MaterialIcons-Regular.ttf");
            if material.is_file() {
                self.material = canvas.create_font("material", &material);
            }
        }
    }

    /// Register the symbols and icon fonts as fallbacks of the regular font.
    pub fn register_fallbacks(&self, canvas: &mut dyn Canvas) {
        let Some(regular) = self.regular else {
            log::error!("[fonts] no regular font, skipping fallbacks");
            return;
        };

        match self.shared_symbols {
            Some(symbols) => {
                log::info!("[fonts] using shared symbols font");
                canvas.add_fallback_font(regular, symbols);
            }
            None => log::error!("[fonts] shared symbols font not found"),
        }

        match self.material {
            Some(material) => {
                log::info!("[fonts] using Material font");
                canvas.add_fallback_font(regular, material);
            }
            None => log::error!("[fonts] Material font not found"),
        }
    }
}
