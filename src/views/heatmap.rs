use std::collections::HashMap;

use crate::data::filter::{select, YearRange};
use crate::data::model::{EnrichedTable, Region};

pub const VALUE_LABEL: &str = "Number of EVs Registered";

/// The counties shown on the heatmap, chosen once over the full
/// jurisdiction so moving the year slider never changes the rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TopCounties {
    /// Highest count first; ties broken by name.
    pub counties: Vec<String>,
    /// Table rows inside the jurisdiction whose county is one of `counties`.
    pub rows: Vec<usize>,
}

impl TopCounties {
    pub fn rank(table: &EnrichedTable, jurisdiction: &str, n: usize) -> Self {
        let Some(state) = table.states.code(jurisdiction) else {
            log::warn!("jurisdiction {jurisdiction:?} does not occur in the data");
            return TopCounties {
                counties: Vec::new(),
                rows: Vec::new(),
            };
        };

        let in_state = |i: &usize| table.rows[*i].vehicle.state == state;
        let mut totals: HashMap<&str, usize> = HashMap::new();
        for row in table.rows.iter().filter(|r| r.vehicle.state == state) {
            if let Some(county) = row.vehicle.county.as_deref() {
                *totals.entry(county).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        let counties: Vec<String> = ranked.into_iter().map(|(c, _)| c.to_string()).collect();

        let rows = (0..table.rows.len())
            .filter(in_state)
            .filter(|&i| {
                table.rows[i]
                    .vehicle
                    .county
                    .as_ref()
                    .is_some_and(|c| counties.contains(c))
            })
            .collect();

        TopCounties { counties, rows }
    }
}

// ---------------------------------------------------------------------------
// Wide and long shapes
// ---------------------------------------------------------------------------

/// Wide table: one row per county, one count column per region.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub counties: Vec<String>,
    /// `counts[i][region.index()]`.
    pub counts: Vec<[usize; 3]>,
}

/// Long table row: one observation per (county, region).
#[derive(Debug, Clone, PartialEq)]
pub struct HeatCell {
    pub county: String,
    pub region: Region,
    pub vehicles: usize,
}

impl CrossTab {
    pub fn melt(&self) -> Vec<HeatCell> {
        let mut cells = Vec::with_capacity(self.counties.len() * Region::ALL.len());
        for region in Region::ALL {
            for (county, counts) in self.counties.iter().zip(&self.counts) {
                cells.push(HeatCell {
                    county: county.clone(),
                    region,
                    vehicles: counts[region.index()],
                });
            }
        }
        cells
    }
}

/// Count vehicles per (county, region) over the top counties within
/// `years`. Every county keeps its row, zero-filled when nothing matches.
pub fn cross_tab(table: &EnrichedTable, top: &TopCounties, years: YearRange) -> CrossTab {
    let mut counts = vec![[0usize; 3]; top.counties.len()];
    for row in select(table, &top.rows).filter(|r| years.contains(r.vehicle.model_year)) {
        let Some(county) = row.vehicle.county.as_deref() else {
            continue;
        };
        if let Some(i) = top.counties.iter().position(|c| c == county) {
            counts[i][row.origin.index()] += 1;
        }
    }
    CrossTab {
        counties: top.counties.clone(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{raw, scenario, table, BEV};
    use crate::data::{enrich::enrich, normalize::normalize};

    fn counties_table() -> EnrichedTable {
        let mut rows = Vec::new();
        // County i gets 12 - i vehicles, spread over model years.
        for (i, county) in ["King", "Snohomish", "Pierce", "Clark", "Thurston"].iter().enumerate() {
            for j in 0..(12 - i) {
                let make = ["TESLA", "NISSAN", "BMW"][j % 3];
                rows.push((make, 2010 + j as i32, Some(100.0), BEV, *county));
            }
        }
        table(&rows)
    }

    #[test]
    fn ranks_counties_by_total() {
        let top = TopCounties::rank(&counties_table(), "WA", 3);
        assert_eq!(top.counties, ["King", "Snohomish", "Pierce"]);
        assert_eq!(top.rows.len(), 12 + 11 + 10);
    }

    #[test]
    fn top_set_ignores_other_jurisdictions() {
        let mut raws = vec![
            raw("TESLA", 2020, Some(250.0), BEV, "King", "WA"),
            raw("TESLA", 2020, Some(250.0), BEV, "Multnomah", "OR"),
            raw("TESLA", 2021, Some(250.0), BEV, "Multnomah", "OR"),
        ];
        raws.push(raw("FIAT", 2016, Some(84.0), BEV, "Yakima", "WA"));
        let table = enrich(normalize(raws).unwrap());
        let top = TopCounties::rank(&table, "WA", 10);
        assert_eq!(top.counties, ["King", "Yakima"]);
    }

    #[test]
    fn unknown_jurisdiction_gives_empty_heatmap() {
        let top = TopCounties::rank(&scenario(), "ZZ", 10);
        assert!(top.counties.is_empty());
        assert!(cross_tab(&scenario(), &top, YearRange::new(2000, 2030)).melt().is_empty());
    }

    #[test]
    fn county_set_is_stable_across_year_filters() {
        let table = counties_table();
        let top = TopCounties::rank(&table, "WA", 3);
        let full = cross_tab(&table, &top, YearRange::new(2010, 2021));
        let narrow = cross_tab(&table, &top, YearRange::new(2020, 2021));
        assert_eq!(full.counties, narrow.counties);
        assert_ne!(full.counts, narrow.counts);
    }

    #[test]
    fn empty_interval_keeps_zero_rows() {
        let table = counties_table();
        let top = TopCounties::rank(&table, "WA", 3);
        let tab = cross_tab(&table, &top, YearRange::new(1990, 1995));
        assert_eq!(tab.counties.len(), 3);
        assert!(tab.counts.iter().all(|c| *c == [0, 0, 0]));
        assert_eq!(tab.melt().len(), 9);
    }

    #[test]
    fn scenario_cell_values() {
        let table = scenario();
        let top = TopCounties::rank(&table, "WA", 10);
        let tab = cross_tab(&table, &top, YearRange::new(2019, 2020));
        let king: Vec<_> = tab
            .melt()
            .into_iter()
            .filter(|c| c.county == "King")
            .map(|c| (c.region, c.vehicles))
            .collect();
        assert_eq!(
            king,
            [(Region::NorthAmerica, 1), (Region::Asia, 1), (Region::Europe, 1)]
        );
    }

    #[test]
    fn melt_produces_one_row_per_pair() {
        let tab = CrossTab {
            counties: vec!["King".into(), "Pierce".into()],
            counts: vec![[5, 2, 0], [1, 0, 3]],
        };
        let cells = tab.melt();
        assert_eq!(cells.len(), 6);
        assert_eq!(
            cells[0],
            HeatCell { county: "King".into(), region: Region::NorthAmerica, vehicles: 5 }
        );
        assert_eq!(
            cells[5],
            HeatCell { county: "Pierce".into(), region: Region::Europe, vehicles: 3 }
        );
        let total: usize = cells.iter().map(|c| c.vehicles).sum();
        assert_eq!(total, 11);
    }
}
