//! Test fixtures for the ingestion driver

use crate::app::services::record_builder::BuildContext;
use chrono::NaiveDate;

mod driver_tests;

pub fn test_context() -> BuildContext {
    BuildContext::new(
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap(),
    )
}

/// Dump covering all five tables, including one duplicate id and one bad row
pub fn create_full_dump() -> String {
    r#"INSERT INTO `environmental_temperatures` (`id`, `temperature`, `max_temperature`, `min_temperature`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 25.5, NULL, NULL, '7:30 am', 'Área Fase Adulta', NULL, 1, '2024-01-01 08:00:00', '2024-01-01 08:00:00'),(2, 26.1, 27.0, 25.0, '12:00 md', 'Insectario', 'ok', 1, '2024-01-01 12:00:00', '2024-01-01 12:00:00');
INSERT INTO `humidities` (`id`, `humidity`, `max_humidity`, `min_humidity`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 70.0, 75.0, 65.0, '93', 'Insectario', '', 1, NULL, NULL);
INSERT INTO `lives` (`id`, `specie_id`, `strain_id`, `tray_start_date`, `pupating_date`, `number_of_trays_fbw`, `live_pupae`, `am_pm_live_pupae`, `dead_pupae`, `am_pm_dead_pupae`, `total_live_and_dead_pupae`, `dead_larvae`, `am_pm_dead_larvae`, `divided_trays`, `tray_time`, `existing_trays_after_work_is_done`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 3, 6, '2024-03-01', NULL, 10, 5, 'AM', 3, 'PM', 0, 2, 'AM', 'no', '8 días', 9, NULL, 1, '2024-03-10 09:00:00', '2024-03-10 09:00:00');
INSERT INTO `pupa_mortality_in_breeders` (`id`, `breeder_code`, `dead_pupae_count`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 2, 17, NULL, 1, NULL, NULL),(1, 3, 4, NULL, 1, NULL, NULL),(2, 'x', 4, NULL, 1, NULL, NULL),(3, 9, 1, NULL, 1, NULL, NULL);
INSERT INTO `tray_water_temperatures` (`id`, `date`, `specie_id`, `strain_id`, `tray_date`, `temp_730am`, `temp_max_730am`, `temp_min_730am`, `temp_1200md`, `temp_max_1200md`, `temp_min_1200md`, `temp_1500pm`, `temp_max_1500pm`, `temp_min_1500pm`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, '2024-05-06', 1, 1, '2024-05-01', 26.5, NULL, NULL, NULL, NULL, NULL, 28, NULL, NULL, NULL, 1, NULL, NULL),(2, '2024-05-07', 1, 1, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, 1, NULL, NULL);
"#
    .to_string()
}
