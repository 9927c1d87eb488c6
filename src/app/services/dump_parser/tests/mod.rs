//! Test fixtures for dump parsing
//!
//! Small dumps in the shape written by the legacy dump generator, shared by
//! the tokenizer, normalizer and extractor tests.


/// Dump with one multi-row statement per table plus unrelated SQL noise
pub fn create_test_dump() -> String {
    r#"-- MySQL dump 10.13
SET NAMES utf8mb4;
CREATE TABLE `environmental_temperatures` (
  `id` bigint unsigned NOT NULL AUTO_INCREMENT,
  PRIMARY KEY (`id`)
);
INSERT INTO `environmental_temperatures` (`id`, `temperature`, `max_temperature`, `min_temperature`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 25.5, NULL, NULL, '7:30 am', 'Área Fase Adulta', NULL, 1, '2024-01-01 08:00:00', '2024-01-01 08:00:00'),
(2, 26.0, 27.5, 24.1, '12:00 md', 'Insectario, sala 2', 'Aire (apagado)', 1, '2024-01-01 12:00:00', '2024-01-01 12:00:00');
INSERT INTO `humidities` (`id`, `humidity`, `max_humidity`, `min_humidity`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (1, 70.2, 75.0, 65.0, '15:00', 'Insectario', '', 1, '2024-01-01 15:00:00', '2024-01-01 15:00:00');
INSERT INTO `lives` (`id`, `specie_id`) VALUES (1, 3);
INSERT INTO `environmental_temperatures` (`id`, `temperature`, `max_temperature`, `min_temperature`, `hour`, `work_area`, `observations`, `user_id`, `created_at`, `updated_at`) VALUES (3, 24.0, NULL, NULL, '3:00 pm', 'Insectario', NULL, 2, NULL, NULL);
"#
    .to_string()
}
