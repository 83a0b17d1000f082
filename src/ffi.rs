//! FFI interface for host interop
//!
//! Structured values cross the boundary as JSON strings. Every returned
//! pointer is owned by Rust and must be released with `promo_free_result`.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Serialize;

use crate::config::ParserConfig;
use crate::facts::{extract_product_facts, ProductFacts};
use crate::logging;
use crate::template::{render_with, RenderOptions};

/// Result struct returned to the host
#[repr(C)]
pub struct PromoResultFFI {
    /// JSON or text payload (null-terminated), or null on failure
    pub value_ptr: *mut c_char,
    /// Error message (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Extract product facts from a page's HTML.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `config_json` - JSON `ParserConfig` (null-terminated), or null for defaults
///
/// # Returns
/// `ProductFacts` as JSON in `value_ptr`
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `config_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `promo_free_result`
#[no_mangle]
pub unsafe extern "C" fn promo_extract_facts(
    html_ptr: *const c_char,
    html_len: usize,
    config_json: *const c_char,
) -> PromoResultFFI {
    let html = match read_html(html_ptr, html_len) {
        Ok(html) => html,
        Err(msg) => return make_error_result(msg),
    };

    let config = match read_optional_json::<ParserConfig>(config_json, "config") {
        Ok(config) => config.unwrap_or_default(),
        Err(msg) => return make_error_result(&msg),
    };

    make_json_result(&extract_product_facts(html, &config))
}

/// Render a template against product facts.
///
/// # Arguments
/// * `template` - Template text (null-terminated)
/// * `facts_json` - JSON `ProductFacts` (null-terminated)
/// * `options_json` - JSON `RenderOptions` (null-terminated), or null for defaults
///
/// # Returns
/// Rendered text in `value_ptr`
///
/// # Safety
/// - `template` and `facts_json` must be valid null-terminated C strings
/// - `options_json` must be null or a valid null-terminated C string
/// - Caller must free the result via `promo_free_result`
#[no_mangle]
pub unsafe extern "C" fn promo_render_template(
    template: *const c_char,
    facts_json: *const c_char,
    options_json: *const c_char,
) -> PromoResultFFI {
    let template = match read_cstr(template, "template") {
        Ok(s) => s,
        Err(msg) => return make_error_result(&msg),
    };

    let facts = match read_optional_json::<ProductFacts>(facts_json, "facts") {
        Ok(Some(facts)) => facts,
        Ok(None) => return make_error_result("Facts JSON is null"),
        Err(msg) => return make_error_result(&msg),
    };

    let options = match read_optional_json::<RenderOptions>(options_json, "options") {
        Ok(options) => options.unwrap_or_default(),
        Err(msg) => return make_error_result(&msg),
    };

    make_text_result(render_with(template, &facts, &options))
}

/// Product facts without the dynamic convenience fields, for the AI service.
///
/// # Safety
/// - `facts_json` must be a valid null-terminated C string
/// - Caller must free the result via `promo_free_result`
#[no_mangle]
pub unsafe extern "C" fn promo_ai_payload(facts_json: *const c_char) -> PromoResultFFI {
    let facts = match read_optional_json::<ProductFacts>(facts_json, "facts") {
        Ok(Some(facts)) => facts,
        Ok(None) => return make_error_result("Facts JSON is null"),
        Err(msg) => return make_error_result(&msg),
    };

    match facts.ai_payload() {
        Ok(payload) => make_json_result(&payload),
        Err(e) => make_error_result(&format!("Failed to build payload: {}", e)),
    }
}

/// Install the stderr log subscriber. Returns false if one was already set.
///
/// # Safety
/// `config_json` must be null or a valid null-terminated C string
#[no_mangle]
pub unsafe extern "C" fn promo_init_logging(config_json: *const c_char) -> bool {
    match read_optional_json::<ParserConfig>(config_json, "config") {
        Ok(config) => logging::init(&config.unwrap_or_default().logging),
        Err(_) => false,
    }
}

/// Free a PromoResultFFI returned by any function in this module
///
/// # Safety
/// - `result` must have been returned by this module
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn promo_free_result(result: PromoResultFFI) {
    if !result.value_ptr.is_null() {
        drop(CString::from_raw(result.value_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

unsafe fn read_html<'a>(html_ptr: *const c_char, html_len: usize) -> Result<&'a str, &'static str> {
    if html_ptr.is_null() || html_len == 0 {
        return Ok("");
    }
    let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
    std::str::from_utf8(slice).map_err(|_| "Invalid UTF-8 in HTML content")
}

unsafe fn read_cstr<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{} is null", what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 in {}", what))
}

unsafe fn read_optional_json<T: serde::de::DeserializeOwned>(
    ptr: *const c_char,
    what: &str,
) -> Result<Option<T>, String> {
    if ptr.is_null() {
        return Ok(None);
    }
    let json = read_cstr(ptr, what)?;
    serde_json::from_str(json)
        .map(Some)
        .map_err(|e| format!("Failed to parse {} JSON: {}", what, e))
}

fn make_json_result<T: Serialize>(value: &T) -> PromoResultFFI {
    match serde_json::to_string(value) {
        Ok(json) => make_text_result(json),
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

fn make_text_result(text: String) -> PromoResultFFI {
    match CString::new(text) {
        Ok(cstr) => PromoResultFFI {
            value_ptr: cstr.into_raw(),
            error_ptr: ptr::null_mut(),
        },
        Err(_) => make_error_result("Result contains null bytes"),
    }
}

fn make_error_result(msg: &str) -> PromoResultFFI {
    let error_cstr = CString::new(msg).unwrap_or_else(|_| CString::from(c"Unknown error"));
    PromoResultFFI {
        value_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
