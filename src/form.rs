//! Build form fields and how parsed builds are written into them
//!
//! The parser knows nothing about field identifiers. A list of
//! [`FieldBinding`]s says which model and price field belong to each slot,
//! and [`BuildForm::apply`] is the only place parsed values reach the form.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parsers::ParsedBuild;
use crate::slots::ComponentSlot;

/// Form field ids for one slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub slot: ComponentSlot,
    pub model_field: String,
    pub price_field: String,
}

impl FieldBinding {
    pub fn new(
        slot: ComponentSlot,
        model_field: impl Into<String>,
        price_field: impl Into<String>,
    ) -> Self {
        Self {
            slot,
            model_field: model_field.into(),
            price_field: price_field.into(),
        }
    }

    /// `model-<slot>` / `price-<slot>` bindings for every slot
    pub fn defaults() -> Vec<FieldBinding> {
        ComponentSlot::ALL
            .into_iter()
            .map(|slot| {
                FieldBinding::new(
                    slot,
                    format!("model-{}", slot.key()),
                    format!("price-{}", slot.key()),
                )
            })
            .collect()
    }
}

/// One displayed row of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow<'a> {
    pub slot: ComponentSlot,
    pub model_field: &'a str,
    pub model: &'a str,
    pub price_field: &'a str,
    pub price: &'a str,
}

/// Text values of the build form, keyed by field id
#[derive(Debug, Clone)]
pub struct BuildForm {
    bindings: Vec<FieldBinding>,
    values: HashMap<String, String>,
}

impl BuildForm {
    /// Create a form with every bound field empty
    pub fn new(bindings: Vec<FieldBinding>) -> Self {
        let mut form = Self {
            bindings,
            values: HashMap::new(),
        };
        form.clear();
        form
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Slots that have a binding, in binding order
    pub fn slots(&self) -> impl Iterator<Item = ComponentSlot> + '_ {
        self.bindings.iter().map(|b| b.slot)
    }

    /// Current value of a field, `None` for an unknown field id
    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Set a field directly, e.g. after a user edit
    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field.into(), value.into());
    }

    /// Empty every bound model and price field
    pub fn clear(&mut self) {
        for binding in &self.bindings {
            self.values.insert(binding.model_field.clone(), String::new());
            self.values.insert(binding.price_field.clone(), String::new());
        }
    }

    /// Replace the form contents with a parsed build.
    ///
    /// All bound fields are cleared first, so nothing from an earlier build
    /// survives; a slot the build has no entry for stays empty.
    pub fn apply(&mut self, build: &ParsedBuild) {
        self.clear();

        for binding in &self.bindings {
            let Some(entry) = build.entry(binding.slot) else {
                continue;
            };
            if entry.is_empty() {
                continue;
            }
            self.values
                .insert(binding.model_field.clone(), entry.model.clone());
            self.values
                .insert(binding.price_field.clone(), entry.price.clone());
        }
    }

    /// Model and price of each bound slot, in binding order
    pub fn rows(&self) -> Vec<FormRow<'_>> {
        self.bindings
            .iter()
            .map(|binding| FormRow {
                slot: binding.slot,
                model_field: &binding.model_field,
                price_field: &binding.price_field,
                model: self.value(&binding.model_field).unwrap_or_default(),
                price: self.value(&binding.price_field).unwrap_or_default(),
            })
            .collect()
    }
}

impl Default for BuildForm {
    fn default() -> Self {
        Self::new(FieldBinding::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::build::BuildParser;

    #[test]
    fn test_default_bindings() {
        let bindings = FieldBinding::defaults();
        assert_eq!(bindings.len(), 8);
        assert_eq!(
            bindings[0],
            FieldBinding::new(ComponentSlot::Cpu, "model-cpu", "price-cpu")
        );
        assert_eq!(bindings[5].model_field, "model-psu");
        assert_eq!(bindings[7].price_field, "price-cooling");
    }

    #[test]
    fn test_new_form_is_empty() {
        let form = BuildForm::default();
        assert_eq!(form.value("model-gpu"), Some(""));
        assert_eq!(form.value("price-storage"), Some(""));
        assert_eq!(form.value("model-monitor"), None);
    }

    #[test]
    fn test_apply_fills_bound_fields() {
        let mut form = BuildForm::default();
        let build = BuildParser::new().parse("Graphics Card (GPU)\n- Radeon RX 9070 XT - £569");

        form.apply(&build);

        assert_eq!(form.value("model-gpu"), Some("Radeon RX 9070 XT"));
        assert_eq!(form.value("price-gpu"), Some("£569"));
        assert_eq!(form.value("model-cpu"), Some(""));
    }

    #[test]
    fn test_apply_empty_build_resets_everything() {
        let mut form = BuildForm::default();
        let parser = BuildParser::new();

        form.apply(&parser.parse("Case\n- Fractal North - £129\nCooling\n- Arctic P12 - £10"));
        assert_eq!(form.value("model-case"), Some("Fractal North"));

        form.apply(&parser.parse(""));
        for binding in form.bindings() {
            assert_eq!(form.value(&binding.model_field), Some(""));
            assert_eq!(form.value(&binding.price_field), Some(""));
        }
    }

    #[test]
    fn test_apply_overwrites_user_edits() {
        let mut form = BuildForm::default();
        form.set_value("model-ram", "My own RAM");
        form.set_value("notes", "keep me");

        form.apply(&BuildParser::new().parse("Storage\n- Crucial T500 1TB - £70"));

        assert_eq!(form.value("model-ram"), Some(""));
        assert_eq!(form.value("model-storage"), Some("Crucial T500 1TB"));
        // Unbound fields are left alone
        assert_eq!(form.value("notes"), Some("keep me"));
    }

    #[test]
    fn test_custom_bindings() {
        let mut form = BuildForm::new(vec![FieldBinding::new(
            ComponentSlot::Cpu,
            "cpu-name",
            "cpu-cost",
        )]);

        form.apply(&BuildParser::new().parse(
            "Processor (CPU)\n- Intel Core i5-14600K - £220\nCase\n- NZXT H5 - £80",
        ));

        assert_eq!(form.value("cpu-name"), Some("Intel Core i5-14600K"));
        assert_eq!(form.value("cpu-cost"), Some("£220"));
        assert_eq!(form.value("model-case"), None);
        assert_eq!(form.slots().collect::<Vec<_>>(), vec![ComponentSlot::Cpu]);
    }

    #[test]
    fn test_binding_for_slot_outside_parser() {
        let mut form = BuildForm::default();
        let parser = BuildParser::with_slots([ComponentSlot::Cpu]);

        form.apply(&parser.parse("Case\n- NZXT H5 - £80"));

        assert_eq!(form.value("model-case"), Some(""));
    }

    #[test]
    fn test_rows() {
        let mut form = BuildForm::default();
        form.apply(&BuildParser::new().parse("Motherboard\n- ASUS TUF B650-PLUS - £160"));

        let rows = form.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(
            rows[2],
            FormRow {
                slot: ComponentSlot::Motherboard,
                model_field: "model-motherboard",
                model: "ASUS TUF B650-PLUS",
                price_field: "price-motherboard",
                price: "£160",
            }
        );
        assert_eq!(rows[0].model, "");
    }
}
