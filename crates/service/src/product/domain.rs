use serde::{Deserialize, Deserializer, Serialize};

use models::product::ProductFilter;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "int_or_string")]
    pub price: i32,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub part_type: Option<String>,
    #[serde(default)]
    pub bike_model: Option<String>,
}

/// Partial update: absent fields are left untouched; a blank string clears
/// an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub price: Option<i32>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub part_type: Option<String>,
    #[serde(default)]
    pub bike_model: Option<String>,
}

/// Query string of the listing endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductQuery {
    pub fn filter(&self) -> ProductFilter {
        ProductFilter {
            product_type: self.product_type.clone(),
            brand: self.brand.clone(),
            part_type: self.part_type.clone(),
            bike_model: self.bike_model.clone(),
            query: self.q.clone(),
        }
        .normalize()
    }

    /// Zero-based `(page_index, per_page)`, or `None` when no page was
    /// requested. `page` 0 reads as the first page; `perPage` is clamped to
    /// 1..=MAX_PER_PAGE.
    pub fn page_window(&self) -> Option<(u64, u64)> {
        let page = self.page?.max(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE);
        Some((u64::from(page - 1), u64::from(per_page)))
    }
}

/// Form posts sometimes send numbers as strings ("1200").
#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i32),
    Str(String),
}

impl IntOrString {
    fn into_i32<E: serde::de::Error>(self) -> Result<i32, E> {
        match self {
            IntOrString::Int(v) => Ok(v),
            IntOrString::Str(s) => s.trim().parse().map_err(|_| E::custom(format!("invalid integer: {s:?}"))),
        }
    }
}

fn int_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<i32, D::Error> {
    IntOrString::deserialize(d)?.into_i32()
}

fn opt_int_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i32>, D::Error> {
    Option::<IntOrString>::deserialize(d)?.map(IntOrString::into_i32).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_number_or_numeric_string() {
        let a: NewProduct = serde_json::from_str(r#"{"name":"Bell","price":300}"#).expect("number");
        let b: NewProduct = serde_json::from_str(r#"{"name":"Bell","price":" 300 "}"#).expect("string");
        assert_eq!(a.price, 300);
        assert_eq!(b.price, 300);
        assert!(serde_json::from_str::<NewProduct>(r#"{"name":"Bell","price":"cheap"}"#).is_err());
    }

    #[test]
    fn patch_fields_are_camel_case_and_optional() {
        let p: ProductPatch = serde_json::from_str(r#"{"bikeModel":"fz","price":"10"}"#).expect("patch");
        assert_eq!(p.bike_model.as_deref(), Some("fz"));
        assert_eq!(p.price, Some(10));
        assert!(p.name.is_none());
    }

    #[test]
    fn query_builds_normalized_filter_and_optional_page() {
        let q = ProductQuery { product_type: Some("Spare Part".into()), page: Some(2), ..Default::default() };
        assert_eq!(q.filter().product_type.as_deref(), Some("spare part"));
        assert_eq!(q.page_window(), Some((1, u64::from(DEFAULT_PER_PAGE))));
        assert_eq!(ProductQuery::default().page_window(), None);
    }

    #[test]
    fn per_page_without_page_lists_everything() {
        let q = ProductQuery { per_page: Some(5), ..Default::default() };
        assert_eq!(q.page_window(), None);
    }

    #[test]
    fn page_window_clamps_storefront_input() {
        let first = ProductQuery { page: Some(0), per_page: Some(0), ..Default::default() };
        assert_eq!(first.page_window(), Some((0, 1)));

        let greedy = ProductQuery { page: Some(3), per_page: Some(5000), ..Default::default() };
        assert_eq!(greedy.page_window(), Some((2, u64::from(MAX_PER_PAGE))));
    }

    #[test]
    fn page_params_parse_from_query_string_names() {
        let q: ProductQuery = serde_json::from_str(r#"{"page":4,"perPage":12,"bikeModel":"fz"}"#).expect("query");
        assert_eq!(q.page_window(), Some((3, 12)));
    }
}
