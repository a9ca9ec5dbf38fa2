//! WASM bindings for promo-engine.
//!
//! Exposes discount arithmetic, the conflict index, assignment validation and
//! best-promotion selection to the booking site and admin back-office via
//! `wasm-bindgen`. Promotions cross the boundary as JSON strings in the booking
//! API's record format, so the front end can hand over exactly what it fetched.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p promo-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/promo-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/promo_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use promo_engine::{DiscountType, Promotion, PromotionStatus, ResourceKind, ResourceRef};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SelectionDto {
    promotion_id: Option<String>,
    promotion_name: Option<String>,
    discounted_price: Decimal,
    savings: Decimal,
}

#[derive(Serialize)]
struct ValidationDto {
    valid: bool,
    error: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers: parse boundary values
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    promo_engine::parse_date(s).map_err(js_err)
}

fn parse_price(s: &str) -> Result<Decimal, JsValue> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|e| JsValue::from_str(&format!("Invalid price '{}': {}", s, e)))
}

fn parse_promotions(json: &str) -> Result<Vec<Promotion>, JsValue> {
    promo_engine::parse_promotions(json).map_err(js_err)
}

fn parse_resource(kind: &str, id: &str) -> Result<ResourceRef, JsValue> {
    let kind: ResourceKind = kind.parse().map_err(js_err)?;
    Ok(ResourceRef {
        kind,
        id: id.to_string(),
    })
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Apply a discount to a base price.
///
/// Prices are passed as decimal strings to avoid float drift. Returns the
/// discounted price as a string.
///
/// # Arguments
/// - `base_price` -- Base price in whole currency units (e.g., "200000")
/// - `discount_type` -- `"percent"` or `"amount"`
/// - `discount_value` -- Percent in `[0, 100]` or a non-negative amount
#[wasm_bindgen(js_name = "computeDiscountedPrice")]
pub fn compute_discounted_price(
    base_price: &str,
    discount_type: &str,
    discount_value: &str,
) -> Result<String, JsValue> {
    let discount_type: DiscountType = discount_type.parse().map_err(js_err)?;
    let price = promo_engine::compute_discounted_price(
        parse_price(base_price)?,
        discount_type,
        parse_price(discount_value)?,
    )
    .map_err(js_err)?;
    Ok(price.to_string())
}

/// Build the conflict index for a candidate date range.
///
/// `promotions_json` is the API's promotion array. Returns
/// `{"rooms": {id: "YYYY-MM-DD"}, "services": {id: "YYYY-MM-DD"}}`.
#[wasm_bindgen(js_name = "buildConflictIndex")]
pub fn build_conflict_index(
    promotions_json: &str,
    candidate_start: &str,
    candidate_end: &str,
    exclude_promotion_id: Option<String>,
) -> Result<String, JsValue> {
    let promotions = parse_promotions(promotions_json)?;
    let index = promo_engine::build_conflict_index(
        &promotions,
        parse_date(candidate_start)?,
        parse_date(candidate_end)?,
        exclude_promotion_id.as_deref(),
    );
    to_json(&index)
}

/// Whether `resource_id` may be assigned to a promotion starting on
/// `candidate_start`, given one kind's conflict map as returned in
/// [`build_conflict_index`] (`rooms` or `services`).
#[wasm_bindgen(js_name = "isAssignable")]
pub fn is_assignable(
    resource_id: &str,
    conflicts_json: &str,
    candidate_start: &str,
) -> Result<bool, JsValue> {
    let conflicts: BTreeMap<String, NaiveDate> = serde_json::from_str(conflicts_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid conflict map JSON: {}", e)))?;
    Ok(promo_engine::is_assignable(
        resource_id,
        &conflicts,
        parse_date(candidate_start)?,
    ))
}

/// Select the best promotion for a room or service on `as_of`.
///
/// `resource_kind` is `"room"` or `"service"`. Returns
/// `{promotion_id, promotion_name, discounted_price, savings}`; the id and name
/// are `null` when nothing applies.
#[wasm_bindgen(js_name = "selectBestPromotion")]
pub fn select_best_promotion(
    promotions_json: &str,
    resource_kind: &str,
    resource_id: &str,
    base_price: &str,
    as_of: &str,
) -> Result<String, JsValue> {
    let promotions = parse_promotions(promotions_json)?;
    let resource = parse_resource(resource_kind, resource_id)?;
    let selection = promo_engine::select_best_promotion(
        &promotions,
        &resource,
        parse_price(base_price)?,
        parse_date(as_of)?,
    );
    to_json(&SelectionDto {
        promotion_id: selection.promotion.as_ref().map(|p| p.id.clone()),
        promotion_name: selection.promotion.as_ref().map(|p| p.name.clone()),
        discounted_price: selection.discounted_price,
        savings: selection.savings,
    })
}

/// Derived status of each promotion on `as_of`, as a `{id: status}` JSON object.
#[wasm_bindgen(js_name = "deriveStatus")]
pub fn derive_status(promotions_json: &str, as_of: &str) -> Result<String, JsValue> {
    let promotions = parse_promotions(promotions_json)?;
    let as_of = parse_date(as_of)?;
    let statuses: BTreeMap<&str, PromotionStatus> = promotions
        .iter()
        .map(|p| (p.id.as_str(), promo_engine::derive_status(p, as_of)))
        .collect();
    to_json(&statuses)
}

/// Validate a candidate promotion record against the saved promotions.
///
/// Malformed input is an error; a conflicting assignment is a normal result
/// `{"valid": false, "error": "..."}` the admin form can display.
#[wasm_bindgen(js_name = "validateAssignment")]
pub fn validate_assignment(
    promotions_json: &str,
    candidate_json: &str,
    as_of: &str,
) -> Result<String, JsValue> {
    let promotions = parse_promotions(promotions_json)?;
    let candidate: promo_engine::WirePromotion = serde_json::from_str(candidate_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid candidate JSON: {}", e)))?;
    let candidate = Promotion::try_from(candidate).map_err(js_err)?;

    let result = promo_engine::validate_assignment(&promotions, &candidate, parse_date(as_of)?);
    to_json(&ValidationDto {
        valid: result.is_ok(),
        error: result.err().map(|e| e.to_string()),
    })
}

// Only success paths are exercised natively: building a `JsValue` error panics
// off a wasm32 target.
#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
      {"idKhuyenMai": 1, "tenKhuyenMai": "January", "loaiKhuyenMai": "room",
       "loaiGiamGia": "percent", "giaTriGiam": 10, "ngayBatDau": "2025-01-01",
       "ngayKetThuc": "2025-01-31", "trangThai": "active",
       "khuyenMaiPhongs": [{"idPhong": 101}]}
    ]"#;

    #[test]
    fn discounted_price_as_string() {
        assert_eq!(
            compute_discounted_price("100000", "percent", "20").unwrap(),
            "80000"
        );
    }

    #[test]
    fn best_promotion_json() {
        let json = select_best_promotion(SNAPSHOT, "room", "101", "200000", "2025-01-15").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["promotion_id"], "1");
        assert_eq!(value["savings"].as_f64(), Some(20000.0));
    }

    #[test]
    fn conflict_index_feeds_is_assignable() {
        let json = build_conflict_index(SNAPSHOT, "2025-01-20", "2025-02-10", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rooms = value["rooms"].to_string();

        assert!(!is_assignable("101", &rooms, "2025-01-31").unwrap());
        assert!(is_assignable("101", &rooms, "2025-02-01").unwrap());
    }

    #[test]
    fn status_map() {
        let json = derive_status(SNAPSHOT, "2025-02-01").unwrap();
        assert_eq!(json, r#"{"1":"expired"}"#);
    }

    #[test]
    fn conflicting_candidate_is_reported_not_thrown() {
        let candidate = r#"{"idKhuyenMai": 2, "tenKhuyenMai": "Flash", "loaiKhuyenMai": "room",
          "loaiGiamGia": "amount", "giaTriGiam": 5000, "ngayBatDau": "2025-01-20",
          "ngayKetThuc": "2025-01-25", "trangThai": "active",
          "khuyenMaiPhongs": [{"idPhong": 101}]}"#;
        let json = validate_assignment(SNAPSHOT, candidate, "2025-01-01").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["valid"], false);
        assert!(value["error"].as_str().unwrap().contains("101"));
    }
}
