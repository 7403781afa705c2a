use std::collections::BTreeMap;

use panel_data_core::FieldConfig;

use crate::frame::Frame;

/// True if both frames have the same name, fields, labels and configs.
///
/// Config values are compared one level deep, except `custom`, whose members
/// are compared one level further. Labels only count when both sides have them.
/// Values are not looked at.
pub fn compare_frame_structures(a: &Frame, b: &Frame, skip_config: bool) -> bool {
    if std::ptr::eq(a, b) {
        return true;
    }
    if a.fields.len() != b.fields.len() || a.name != b.name {
        return false;
    }

    for (fa, fb) in a.fields.iter().zip(&b.fields) {
        if fa.field_type != fb.field_type || fa.name != fb.name {
            return false;
        }
        if skip_config {
            continue;
        }
        if let (Some(la), Some(lb)) = (&fa.labels, &fb.labels) {
            if !shallow_compare(la, lb) {
                return false;
            }
        }
        if !compare_configs(&fa.config, &fb.config) {
            return false;
        }
    }

    true
}

fn compare_configs(a: &FieldConfig, b: &FieldConfig) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, va)| match b.get(key) {
        None => false,
        Some(vb) if key == "custom" => match (va.as_object(), vb.as_object()) {
            (Some(ca), Some(cb)) => {
                ca.len() == cb.len() && ca.iter().all(|(k, v)| cb.get(k) == Some(v))
            }
            _ => va == vb,
        },
        Some(vb) => va == vb,
    })
}

/// True if both slices have the same length and every pair satisfies `cmp`.
pub fn compare_array_values<T>(a: &[T], b: &[T], cmp: impl Fn(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| cmp(x, y))
}

pub fn shallow_compare<V: PartialEq>(a: &BTreeMap<String, V>, b: &BTreeMap<String, V>) -> bool {
    a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
}
