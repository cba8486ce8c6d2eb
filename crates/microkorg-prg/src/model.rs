//! Section / parameter model shared by every decoder.
//!
//! A section mirrors one row of the device's edit panel: a name and five
//! knob positions. Positions without a parameter hold `None`, which
//! serializes as `null` so every section carries all five slots.

use serde::Serialize;
use std::fmt;

/// Knob positions per section.
pub const SLOT_COUNT: usize = 5;

/// Label shown for a parameter that does not apply in the current mode.
pub const PLACEHOLDER: &str = "- - -";

/// Decoded parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Raw or normalized number.
    Int(i32),
    /// On/off switch.
    Bool(bool),
    /// Option label, note value or formatted quantity.
    Label(String),
    /// DWGS wavetable reference.
    Wavetable {
        /// Wavetable index as stored in the program.
        index: u8,
        /// Resolved name, `None` if the lookup did not know the index.
        name: Option<String>,
    },
}

impl ParamValue {
    /// The "not applicable" label.
    pub fn placeholder() -> Self {
        ParamValue::Label(PLACEHOLDER.to_string())
    }

    /// Whether this is the "not applicable" label.
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ParamValue::Label(label) if label == PLACEHOLDER)
    }

    /// Integer payload, if any.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Label payload, if any.
    pub fn as_label(&self) -> Option<&str> {
        match self {
            ParamValue::Label(label) => Some(label),
            _ => None,
        }
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u8> for ParamValue {
    fn from(value: u8) -> Self {
        ParamValue::Int(i32::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(label: &str) -> Self {
        ParamValue::Label(label.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(label: String) -> Self {
        ParamValue::Label(label)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Bool(true) => f.write_str("ON"),
            ParamValue::Bool(false) => f.write_str("OFF"),
            ParamValue::Label(label) => f.write_str(label),
            ParamValue::Wavetable { index, name } => {
                write!(f, "{index}. {}", name.as_deref().unwrap_or("?"))
            }
        }
    }
}

/// A named parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Panel label, e.g. `"CUTOFF"`.
    pub name: &'static str,
    /// Decoded value.
    pub value: ParamValue,
}

impl Param {
    /// Create a parameter.
    pub fn new(name: &'static str, value: impl Into<ParamValue>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// The five slots of a section, filled front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params([Option<Param>; SLOT_COUNT]);

impl Params {
    /// All slots empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_slots(slots: [Option<Param>; SLOT_COUNT]) -> Self {
        Self(slots)
    }

    /// Slot view.
    pub fn slots(&self) -> &[Option<Param>; SLOT_COUNT] {
        &self.0
    }
}

macro_rules! impl_params_from_array {
    ($($len:literal),+) => {
        $(
            impl From<[Param; $len]> for Params {
                fn from(params: [Param; $len]) -> Self {
                    let mut slots: [Option<Param>; SLOT_COUNT] = Default::default();
                    for (slot, param) in slots.iter_mut().zip(params) {
                        *slot = Some(param);
                    }
                    Params(slots)
                }
            }
        )+
    };
}

impl_params_from_array!(1, 2, 3, 4, 5);

/// One panel row: a name and five knob positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: &'static str,
    params: Params,
}

impl Section {
    /// Section with all slots empty.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Params::empty(),
        }
    }

    /// Section built in one step.
    pub fn with_params(name: &'static str, params: impl Into<Params>) -> Self {
        Self {
            name,
            params: params.into(),
        }
    }

    /// Replace every slot at once. Slots not covered by `params` end up empty.
    pub fn set_params(&mut self, params: impl Into<Params>) {
        self.params = params.into();
    }

    /// Section name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parameter at a 1-based knob position.
    pub fn param(&self, position: usize) -> Option<&Param> {
        position
            .checked_sub(1)
            .and_then(|index| self.params.0.get(index))
            .and_then(Option::as_ref)
    }

    /// First parameter with the given name.
    pub fn find(&self, name: &str) -> Option<&Param> {
        self.iter().find(|param| param.name == name)
    }

    /// Filled slots in position order.
    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.0.iter().flatten()
    }

    /// All five slots.
    pub fn slots(&self) -> &[Option<Param>; SLOT_COUNT] {
        self.params.slots()
    }
}
