use std::collections::BTreeMap;

pub type MenuPath = String;
pub type ItemId = String;

/// One reply row: attribute name to attribute value, exactly as the device sent it.
pub type Row = BTreeMap<String, String>;

/// Attribute carrying the internal item identifier on every menu.
pub const ID_FIELD: &str = ".id";
