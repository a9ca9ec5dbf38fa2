//! Mapping between booking-API promotion records and the canonical model.
//!
//! The API speaks localized field names (`idKhuyenMai`, `ngayBatDau`, ...), sends
//! ids as either strings or numbers, and is inconsistent about the casing of
//! assignment id fields. All of that is absorbed here, once; the rest of the
//! crate only sees [`Promotion`].
//!
//! Dates arrive as `YYYY-MM-DD`, sometimes with a time-of-day suffix. The suffix
//! is discarded so every comparison happens on calendar dates.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::discount::{DiscountSpec, DiscountType};
use crate::error::{PromoError, Result};
use crate::overlap::DateRange;
use crate::promotion::{Promotion, PromotionKind, PromotionStatus};

/// A promotion as sent by `GET /api/KhuyenMai`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePromotion {
    #[serde(alias = "IdKhuyenMai")]
    pub id_khuyen_mai: WireId,
    #[serde(default)]
    pub ten_khuyen_mai: String,
    pub loai_khuyen_mai: String,
    pub loai_giam_gia: String,
    pub gia_tri_giam: Decimal,
    pub ngay_bat_dau: String,
    pub ngay_ket_thuc: String,
    pub trang_thai: WireStatus,
    #[serde(default)]
    pub khuyen_mai_phongs: Vec<WireAssignment>,
    #[serde(default)]
    pub khuyen_mai_dich_vus: Vec<WireAssignment>,
}

/// Ids are numeric in some endpoints and strings in others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{n}"),
            WireId::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// Status is a label in the admin API and a boolean flag in older payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireStatus {
    Flag(bool),
    Label(String),
}

/// A room or service assignment: either a bare id or a join record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireAssignment {
    Id(WireId),
    Record(AssignmentRecord),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AssignmentRecord {
    #[serde(
        rename = "idPhong",
        alias = "IdPhong",
        alias = "idphong",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub room_id: Option<WireId>,
    #[serde(
        rename = "idDichVu",
        alias = "iddichVu",
        alias = "IddichVu",
        alias = "IdDichVu",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_id: Option<WireId>,
}

/// Parse an API date, discarding any time-of-day suffix.
///
/// # Errors
/// Returns `PromoError::InvalidDate` unless the value starts with a valid
/// `YYYY-MM-DD` date followed by nothing, `T...`, or ` ...`.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let invalid = || PromoError::InvalidDate(raw.to_string());

    let date_part = raw.get(..10).ok_or_else(invalid)?;
    let rest = raw.get(10..).ok_or_else(invalid)?;
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid())
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase().replace(['_', '-'], " ")
}

fn parse_kind(raw: &str) -> Result<PromotionKind> {
    match normalize(raw).as_str() {
        "room" | "phong" | "phòng" => Ok(PromotionKind::Room),
        "service" | "dich vu" | "dịch vụ" | "dichvu" => Ok(PromotionKind::Service),
        "combo" => Ok(PromotionKind::Combo),
        _ => Err(PromoError::UnknownKind(raw.to_string())),
    }
}

fn parse_discount_type(raw: &str) -> Result<DiscountType> {
    match normalize(raw).as_str() {
        "percent" | "percentage" | "%" | "phan tram" | "phần trăm" => Ok(DiscountType::Percent),
        "amount" | "fixed" | "so tien" | "số tiền" => Ok(DiscountType::Amount),
        _ => Err(PromoError::UnknownDiscountType(raw.to_string())),
    }
}

fn parse_status(raw: &WireStatus) -> Result<PromotionStatus> {
    match raw {
        WireStatus::Flag(true) => Ok(PromotionStatus::Active),
        WireStatus::Flag(false) => Ok(PromotionStatus::Inactive),
        WireStatus::Label(label) => match normalize(label).as_str() {
            "active" | "hoat dong" | "hoạt động" => Ok(PromotionStatus::Active),
            "inactive" | "ngung hoat dong" | "ngừng hoạt động" => {
                Ok(PromotionStatus::Inactive)
            }
            "expired" | "het han" | "hết hạn" => Ok(PromotionStatus::Expired),
            _ => Err(PromoError::UnknownStatus(label.clone())),
        },
    }
}

fn collect_ids(
    promotion_id: &str,
    assignments: &[WireAssignment],
    pick: fn(&AssignmentRecord) -> Option<&WireId>,
) -> Result<BTreeSet<String>> {
    assignments
        .iter()
        .map(|assignment| {
            let id = match assignment {
                WireAssignment::Id(id) => Some(id),
                WireAssignment::Record(record) => pick(record),
            };
            id.map(WireId::to_string)
                .filter(|id| !id.is_empty())
                .ok_or_else(|| {
                    PromoError::InvalidRecord(format!(
                        "promotion {promotion_id}: assignment without an id"
                    ))
                })
        })
        .collect()
}

impl TryFrom<WirePromotion> for Promotion {
    type Error = PromoError;

    fn try_from(wire: WirePromotion) -> Result<Self> {
        let id = wire.id_khuyen_mai.to_string();
        if id.is_empty() {
            return Err(PromoError::InvalidRecord("empty promotion id".to_string()));
        }

        let period = DateRange::new(
            parse_date(&wire.ngay_bat_dau)?,
            parse_date(&wire.ngay_ket_thuc)?,
        )?;
        let discount = DiscountSpec::new(
            parse_discount_type(&wire.loai_giam_gia)?,
            wire.gia_tri_giam,
        )?;

        let promotion = Promotion {
            kind: parse_kind(&wire.loai_khuyen_mai)?,
            status: parse_status(&wire.trang_thai)?,
            room_ids: collect_ids(&id, &wire.khuyen_mai_phongs, |r| r.room_id.as_ref())?,
            service_ids: collect_ids(&id, &wire.khuyen_mai_dich_vus, |r| r.service_id.as_ref())?,
            name: wire.ten_khuyen_mai,
            discount,
            period,
            id,
        };
        promotion.check_assignments()?;
        Ok(promotion)
    }
}

impl From<&Promotion> for WirePromotion {
    fn from(p: &Promotion) -> Self {
        let rooms = p
            .room_ids
            .iter()
            .map(|id| {
                WireAssignment::Record(AssignmentRecord {
                    room_id: Some(WireId::Text(id.clone())),
                    service_id: None,
                })
            })
            .collect();
        let services = p
            .service_ids
            .iter()
            .map(|id| {
                WireAssignment::Record(AssignmentRecord {
                    room_id: None,
                    service_id: Some(WireId::Text(id.clone())),
                })
            })
            .collect();

        Self {
            id_khuyen_mai: WireId::Text(p.id.clone()),
            ten_khuyen_mai: p.name.clone(),
            loai_khuyen_mai: p.kind.as_str().to_string(),
            loai_giam_gia: p.discount.discount_type().as_str().to_string(),
            gia_tri_giam: p.discount.value(),
            ngay_bat_dau: p.period.start().format("%Y-%m-%d").to_string(),
            ngay_ket_thuc: p.period.end().format("%Y-%m-%d").to_string(),
            trang_thai: WireStatus::Label(p.status.as_str().to_string()),
            khuyen_mai_phongs: rooms,
            khuyen_mai_dich_vus: services,
        }
    }
}

/// Parse a JSON array of API promotion records into canonical promotions.
///
/// # Errors
/// Fails on the first malformed record; a snapshot is never partially accepted.
pub fn parse_promotions(json: &str) -> Result<Vec<Promotion>> {
    let records: Vec<WirePromotion> = serde_json::from_str(json)?;
    records.into_iter().map(Promotion::try_from).collect()
}
