use std::collections::BTreeMap;

use isg_common::{DeviceTable, labels};

use crate::client::Device;
use crate::error::ScrapeError;
use crate::extract;
use crate::Result;

/// Flat label → value mapping served by `/stats`.
pub type Statistics = BTreeMap<String, String>;

/// Walk the device pages in a fixed order and assemble one flat mapping.
///
/// Pages are fetched sequentially; the first failure aborts the walk and no
/// partial mapping is returned.
pub async fn collect_statistics(device: &dyn Device, table: &DeviceTable) -> Result<Statistics> {
    let pages = &table.pages;
    let keys = &table.keys;
    let mut out = Statistics::new();

    // Anlage, Wärmepumpe
    for page in [&pages.system, &pages.heat_pump] {
        let body = fetch(device, page).await?;
        let rows = extract::table_rows(&body);
        tracing::debug!(page = %page, rows = rows.len(), "stats.table_rows");
        out.extend(rows);
    }

    // Kühlen
    let body = fetch(device, &pages.cooling).await?;
    out.insert(labels::COOLING.into(), extract::cooling_state(&body)?);

    // Heizen
    let body = fetch(device, &pages.heating).await?;
    for (label, key) in [
        (labels::HEATING_COMFORT_TEMPERATURE, &keys.heating_comfort_temperature),
        (labels::HEATING_ECO_TEMPERATURE, &keys.heating_eco_temperature),
        (labels::HEATING_CURVE_SLOPE, &keys.heating_curve_slope),
    ] {
        out.insert(label.into(), extract::js_value(&body, key)?);
    }

    // Warmwasser
    let body = fetch(device, &pages.hot_water).await?;
    for (label, key) in [
        (labels::HOT_WATER_COMFORT_TEMPERATURE, &keys.hot_water_comfort_temperature),
        (labels::HOT_WATER_ECO_TEMPERATURE, &keys.hot_water_eco_temperature),
    ] {
        out.insert(label.into(), extract::js_value(&body, key)?);
    }

    // Start
    let body = fetch(device, &pages.overview).await?;
    out.insert(
        labels::INDOOR_TEMPERATURE.into(),
        extract::js_obj_value(&body, &keys.indoor_temperature)?,
    );
    out.insert(
        labels::HOT_WATER_TEMPERATURE.into(),
        extract::js_obj_value(&body, &keys.hot_water_temperature)?,
    );
    out.insert(labels::OPERATING_MODE.into(), extract::operating_mode(&body)?);

    tracing::info!(entries = out.len(), "stats.collected");
    Ok(out)
}

/// Current value of one writable setting, read from its settings page.
///
/// Heating keys are looked up first, so a key shared with hot water resolves
/// to the heating page.
pub async fn read_setting(device: &dyn Device, table: &DeviceTable, key: &str) -> Result<String> {
    let page = if table.keys.heating().contains(&key) {
        &table.pages.heating
    } else if table.keys.hot_water().contains(&key) {
        &table.pages.hot_water
    } else {
        return Err(ScrapeError::UnknownParameter(key.to_string()));
    };
    let body = fetch(device, page).await?;
    Ok(extract::js_value(&body, key)?)
}

async fn fetch(device: &dyn Device, page: &str) -> Result<String> {
    tracing::debug!(page, "stats.fetch");
    device.fetch(page).await
}
