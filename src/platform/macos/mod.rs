//! macOS binding of [`TreeAccess`] over the Accessibility API (`AXUIElement`).
//!
//! Every attribute is requested as a raw `CFType` and converted by type id:
//! `CFString` becomes text, `CFBoolean` a flag, and `AXValue` a point or size.
//! Anything else (or a failed query) is reported as absent.

pub mod permissions;

use accessibility::attribute::AXAttribute;
use accessibility::{AXUIElement, AXUIElementAttributes};
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use std::ffi::c_void;
use std::time::Duration;

use crate::snapshot::{Point, Size};
use crate::types::ExtractionError;
use crate::walker::{Attribute, AttributeValue, TreeAccess};

pub use permissions::{
    ensure_trusted, is_trusted, is_trusted_with_prompt, open_accessibility_preferences,
    permission_instructions,
};

/// How long to wait for an application to answer before giving up.
pub const APP_TIMEOUT: Duration = Duration::from_secs(5);

#[repr(C)]
#[derive(Default)]
struct RawPoint {
    x: f64,
    y: f64,
}

#[repr(C)]
#[derive(Default)]
struct RawSize {
    width: f64,
    height: f64,
}

/// The live accessibility tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct AxTree;

impl TreeAccess for AxTree {
    type Handle = AXUIElement;

    fn children(&self, handle: &AXUIElement) -> Vec<AXUIElement> {
        let mut result = Vec::new();
        if let Ok(children) = handle.children() {
            for i in 0..children.len() {
                if let Some(child) = children.get(i) {
                    result.push(AXUIElement::clone(&child));
                }
            }
        }
        result
    }

    fn attribute(&self, handle: &AXUIElement, attribute: Attribute) -> Option<AttributeValue> {
        let raw = AXAttribute::<CFType>::new(&CFString::new(attribute.ax_name()));
        let value = handle.attribute(&raw).ok()?;
        match attribute {
            Attribute::Focused
            | Attribute::Enabled
            | Attribute::Main
            | Attribute::Minimized
            | Attribute::Hidden => cftype_to_bool(&value).map(AttributeValue::Flag),
            Attribute::Position => cftype_to_point(&value).map(AttributeValue::Point),
            Attribute::Size => cftype_to_size(&value).map(AttributeValue::Size),
            _ => cftype_to_string(&value).map(AttributeValue::Text),
        }
    }
}

/// Resolve a running application by bundle identifier.
pub fn application(bundle_id: &str) -> Result<AXUIElement, ExtractionError> {
    AXUIElement::application_with_bundle_timeout(bundle_id, APP_TIMEOUT).map_err(|e| {
        log::error!("[AX-EXTRACTOR] ❌ Application not reachable: {}", bundle_id);
        ExtractionError::TargetNotAvailable(format!("{}: {:?}", bundle_id, e))
    })
}

/// The application's display name, if it reports one.
pub fn app_name(app: &AXUIElement) -> Option<String> {
    app.title().ok().map(|title| title.to_string())
}

/// The focused window of the application with `bundle_id`.
pub fn focused_window(bundle_id: &str) -> Result<(AXUIElement, AXUIElement), ExtractionError> {
    let app = application(bundle_id)?;
    let window = app.focused_window().map_err(|e| {
        log::error!("[AX-EXTRACTOR] ❌ No focused window in {}", bundle_id);
        ExtractionError::TargetNotAvailable(format!("{}: no focused window: {:?}", bundle_id, e))
    })?;
    Ok((app, window))
}

fn cftype_to_string(value: &CFType) -> Option<String> {
    let type_id = value.type_of();
    let ptr = value.as_CFTypeRef();

    if type_id == CFString::type_id() {
        let cf_string: CFString =
            unsafe { CFString::wrap_under_get_rule(ptr as core_foundation::string::CFStringRef) };
        return Some(cf_string.to_string());
    }

    // Sliders, steppers and progress indicators report numeric values.
    if type_id == CFNumber::type_id() {
        let cf_number: CFNumber =
            unsafe { CFNumber::wrap_under_get_rule(ptr as core_foundation::number::CFNumberRef) };
        if let Some(n) = cf_number.to_i64() {
            return Some(n.to_string());
        }
        return cf_number.to_f64().map(|n| n.to_string());
    }

    None
}

fn cftype_to_bool(value: &CFType) -> Option<bool> {
    if value.type_of() != CFBoolean::type_id() {
        return None;
    }
    let cf_bool: CFBoolean = unsafe {
        CFBoolean::wrap_under_get_rule(value.as_CFTypeRef() as core_foundation::boolean::CFBooleanRef)
    };
    Some(cf_bool.into())
}

/// Copy an `AXValue` of the given type into `out`.
fn read_ax_value<T>(value: &CFType, kind: accessibility_sys::AXValueType, out: &mut T) -> bool {
    if value.type_of() != unsafe { accessibility_sys::AXValueGetTypeID() } {
        return false;
    }
    let ax_value = value.as_CFTypeRef() as accessibility_sys::AXValueRef;
    unsafe {
        accessibility_sys::AXValueGetType(ax_value) == kind
            && accessibility_sys::AXValueGetValue(ax_value, kind, out as *mut T as *mut c_void) as u8
                != 0
    }
}

fn cftype_to_point(value: &CFType) -> Option<Point> {
    let mut raw = RawPoint::default();
    read_ax_value(value, accessibility_sys::kAXValueTypeCGPoint, &mut raw)
        .then_some(Point { x: raw.x, y: raw.y })
}

fn cftype_to_size(value: &CFType) -> Option<Size> {
    let mut raw = RawSize::default();
    read_ax_value(value, accessibility_sys::kAXValueTypeCGSize, &mut raw).then_some(Size {
        width: raw.width,
        height: raw.height,
    })
}
