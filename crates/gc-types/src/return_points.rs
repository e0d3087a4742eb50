use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReturnPoint {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub eircode: Option<String>,
    #[serde(default)]
    pub retailer: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl ReturnPoint {
    /// Marker colour by machine type.
    pub fn marker_color(&self) -> &'static str {
        match self.kind.trim().to_ascii_uppercase().as_str() {
            "RVM" => "#22d3ee",
            "MANUAL" => "#fbbf24",
            _ => "#60a5fa",
        }
    }

    /// Case-insensitive match against name, retailer and eircode.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [Some(self.name.as_str()), self.retailer.as_deref(), self.eircode.as_deref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=17/{lat}/{lng}",
            lat = self.lat,
            lng = self.lng
        )
    }
}

/// Distinct retailer names, sorted, for the chain filter.
pub fn retailers(points: &[ReturnPoint]) -> Vec<String> {
    let mut names: Vec<String> = points
        .iter()
        .filter_map(|p| p.retailer.as_deref())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    names.sort_by_key(|n| n.to_lowercase());
    names.dedup_by(|a, b| a.eq_ignore_ascii_case(b));
    names
}

/// Points matching the search text and, when one is picked, the chain.
pub fn filter_points<'a>(points: &'a [ReturnPoint], needle: &str, chain: &str) -> Vec<&'a ReturnPoint> {
    points
        .iter()
        .filter(|p| {
            chain.is_empty()
                || p.retailer
                    .as_deref()
                    .is_some_and(|r| r.trim().eq_ignore_ascii_case(chain))
        })
        .filter(|p| p.matches(needle))
        .collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ReturnPointsPage {
    #[serde(default)]
    pub items: Vec<ReturnPoint>,
    #[serde(default)]
    pub total: u64,
}

/// Query parameters for `/return-points`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ReturnPointsQuery {
    pub chain: Option<String>,
    pub q: Option<String>,
    pub near: Option<(f64, f64)>,
    pub page: u32,
    pub page_size: u32,
}

impl ReturnPointsQuery {
    pub fn all(pageSize: u32) -> Self {
        Self {
            page: 1,
            page_size: pageSize,
            ..Default::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(chain) = self.chain.as_ref().filter(|c| !c.is_empty()) {
            pairs.push(("chain", chain.clone()));
        }
        if let Some(q) = self.q.as_ref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.clone()));
        }
        if let Some((lat, lng)) = self.near {
            pairs.push(("near", format!("{lat},{lng}")));
        }
        if self.page > 0 {
            pairs.push(("page", self.page.to_string()));
        }
        if self.page_size > 0 {
            pairs.push(("pageSize", self.page_size.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(kind: &str) -> ReturnPoint {
        ReturnPoint {
            id: 1,
            name: "SuperMart Dundrum RVM".into(),
            kind: kind.into(),
            eircode: Some("D14 XY12".into()),
            retailer: Some("SuperMart".into()),
            lat: 53.2891,
            lng: -6.2387,
        }
    }

    #[test]
    fn marker_colours_by_type() {
        assert_eq!(point("rvm").marker_color(), "#22d3ee");
        assert_eq!(point("MANUAL").marker_color(), "#fbbf24");
        assert_eq!(point("").marker_color(), "#60a5fa");
    }

    #[test]
    fn search_matches_any_text_field() {
        let p = point("RVM");
        assert!(p.matches("dundrum"));
        assert!(p.matches("d14"));
        assert!(p.matches("  "));
        assert!(!p.matches("tesco"));
    }

    #[test]
    fn query_pairs_skip_empty_filters() {
        let mut query = ReturnPointsQuery::all(200);
        query.chain = Some(String::new());
        query.near = Some((53.3, -6.2));
        assert_eq!(
            query.to_pairs(),
            vec![
                ("near", "53.3,-6.2".to_string()),
                ("page", "1".to_string()),
                ("pageSize", "200".to_string()),
            ]
        );
    }

    #[test]
    fn chain_filter_and_retailer_list() {
        let mut other = point("MANUAL");
        other.id = 2;
        other.name = "Corner Shop".into();
        other.retailer = Some("supermart".into());
        let mut third = point("RVM");
        third.id = 3;
        third.name = "Fresh Foods Swords".into();
        third.retailer = Some("Fresh Foods".into());
        let points = vec![point("RVM"), other, third];

        assert_eq!(retailers(&points), vec!["Fresh Foods".to_string(), "SuperMart".to_string()]);

        let ids: Vec<i64> = filter_points(&points, "", "SUPERMART").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let ids: Vec<i64> = filter_points(&points, "corner", "SuperMart").iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(filter_points(&points, "swords", "").len(), 1);
    }
}
