//! Controlador del listado de vehículos
//!
//! Guarda el estado de la vista (búsqueda, filtro, orden, página, selección,
//! formulario de alta) y una copia local de la lista. La copia sólo se
//! sincroniza con el store al cargar y mediante actualizaciones explícitas;
//! las altas locales no se envían al store.

use std::cmp::Ordering;
use tracing::{debug, error, info, warn};

use super::detail_panel::{DetailPanel, SAVE_FAILED_MESSAGE};
use crate::models::dashboard::{SortField, SortOrder, StatusFilter, PAGE_SIZE};
use crate::models::vehicle::{Vehicle, VehiclePatch};
use crate::repositories::VehicleStore;
use crate::utils::errors::{AppError, AppResult, PanelError, StoreError};

#[derive(Debug, Clone)]
pub struct FleetDashboard {
    vehicles: Vec<Vehicle>,
    loading: bool,
    search_term: String,
    status_filter: StatusFilter,
    sort_field: Option<SortField>,
    sort_order: SortOrder,
    current_page: usize,
    detail: Option<DetailPanel>,
    add_form_open: bool,
}

impl Default for FleetDashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl FleetDashboard {
    /// Estado inicial: lista vacía y carga pendiente
    pub fn new() -> Self {
        Self {
            vehicles: Vec::new(),
            loading: true,
            search_term: String::new(),
            status_filter: StatusFilter::All,
            sort_field: None,
            sort_order: SortOrder::Asc,
            current_page: 1,
            detail: None,
            add_form_open: false,
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn sort_field(&self) -> Option<SortField> {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    // ---- carga ----

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Aplicar el resultado de una carga. Un error deja la lista como estaba.
    pub fn finish_load(&mut self, result: Result<Vec<Vehicle>, StoreError>) {
        match result {
            Ok(vehicles) => {
                info!("📋 Dashboard cargado con {} vehículos", vehicles.len());
                self.vehicles = vehicles;
            }
            Err(e) => {
                error!("❌ Error loading vehicles: {}", e);
            }
        }
        self.loading = false;
    }

    /// Cargar (o recargar) la lista desde el store
    pub async fn load(&mut self, store: &dyn VehicleStore) {
        self.begin_load();
        let result = store.list_vehicles().await;
        self.finish_load(result);
    }

    // ---- filtros, orden y paginación ----

    /// Cambiar el término de búsqueda; vuelve a la página 1
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Cambiar el filtro de estado; vuelve a la página 1
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.current_page = 1;
    }

    /// Misma columna: invierte la dirección. Otra columna: ascendente.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == Some(field) {
            self.sort_order = self.sort_order.flipped();
        } else {
            self.sort_field = Some(field);
            self.sort_order = SortOrder::Asc;
        }
        debug!("↕️ Orden: {:?} {:?}", self.sort_field, self.sort_order);
    }

    /// Vista filtrada y ordenada (sin paginar)
    pub fn filtered_and_sorted(&self) -> Vec<&Vehicle> {
        let needle = self.search_term.to_lowercase();

        let mut filtered: Vec<&Vehicle> = self
            .vehicles
            .iter()
            .filter(|v| needle.is_empty() || v.vehicle_name.to_lowercase().contains(&needle))
            .filter(|v| self.status_filter.matches(v))
            .collect();

        if let Some(field) = self.sort_field {
            let order = self.sort_order;
            // sort_by es estable: los empates conservan el orden relativo
            filtered.sort_by(|a, b| {
                let ordering = compare_by(field, a, b);
                match order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        filtered
    }

    pub fn total_pages(&self) -> usize {
        self.filtered_and_sorted().len().div_ceil(PAGE_SIZE)
    }

    /// Elementos de la página actual
    pub fn page_items(&self) -> Vec<&Vehicle> {
        let start = (self.current_page.max(1) - 1) * PAGE_SIZE;
        self.filtered_and_sorted()
            .into_iter()
            .skip(start)
            .take(PAGE_SIZE)
            .collect()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }

    /// Habilitado mientras no se esté en la última página, también si la
    /// página actual quedó por encima del total tras encoger la lista
    pub fn has_next_page(&self) -> bool {
        let total = self.total_pages();
        total != 0 && self.current_page != total
    }

    /// Avanzar una página, con techo en el total de páginas
    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.current_page = (self.current_page + 1).min(self.total_pages());
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.current_page -= 1;
        }
    }

    // ---- selección y panel de detalle ----

    /// Abrir el panel de detalle con el vehículo indicado
    pub fn select_vehicle(&mut self, id: &str) -> Option<&DetailPanel> {
        let vehicle = self.vehicles.iter().find(|v| v.id == id)?.clone();
        debug!("👁️ Vehículo seleccionado: {}", id);
        self.detail = Some(DetailPanel::open(vehicle));
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&DetailPanel> {
        self.detail.as_ref()
    }

    pub fn detail_mut(&mut self) -> Result<&mut DetailPanel, PanelError> {
        self.detail.as_mut().ok_or(PanelError::NoSelection)
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.detail.as_ref().map(DetailPanel::vehicle)
    }

    /// Iniciar el guardado del panel: devuelve el id y el parche a enviar
    pub fn begin_save(&mut self) -> Result<(String, VehiclePatch), PanelError> {
        let panel = self.detail_mut()?;
        let patch = panel.begin_save()?;
        Ok((panel.vehicle().id.clone(), patch))
    }

    /// Resolver un guardado.
    ///
    /// El resultado se aplica a la lista aunque el panel se haya cerrado
    /// mientras tanto.
    pub fn complete_save(
        &mut self,
        id: &str,
        result: Result<Vehicle, StoreError>,
    ) -> Result<Vehicle, StoreError> {
        if let Some(panel) = self.detail.as_mut().filter(|p| p.vehicle().id == id) {
            panel.finish_save(&result);
        }

        match &result {
            Ok(updated) => self.handle_vehicle_update(updated.clone()),
            Err(e) => error!("❌ Error updating vehicle {}: {}", id, e),
        }
        result
    }

    /// Guardar el panel abierto contra el store
    pub async fn save_detail(&mut self, store: &dyn VehicleStore) -> AppResult<Vehicle> {
        let (id, patch) = self.begin_save()?;
        let result = store.update_vehicle(&id, patch).await;
        self.complete_save(&id, result).map_err(save_failure)
    }

    /// Reemplazar en la lista local todo registro con el mismo id
    pub fn handle_vehicle_update(&mut self, updated: Vehicle) {
        for vehicle in self.vehicles.iter_mut().filter(|v| v.id == updated.id) {
            *vehicle = updated.clone();
        }
        if let Some(panel) = self.detail.as_mut().filter(|p| p.vehicle().id == updated.id) {
            panel.refresh(updated);
        }
    }

    // ---- alta local ----

    pub fn open_add_form(&mut self) {
        self.add_form_open = true;
    }

    pub fn close_add_form(&mut self) {
        self.add_form_open = false;
    }

    /// Añadir un vehículo al principio de la lista local y cerrar el formulario.
    ///
    /// No pasa por el store y no comprueba ids duplicados.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        if self.vehicles.iter().any(|v| v.id == vehicle.id) {
            warn!("⚠️ Añadiendo vehículo con id duplicado: {}", vehicle.id);
        }
        info!("➕ Vehículo {} añadido a la lista local", vehicle.id);
        self.vehicles.insert(0, vehicle);
        self.add_form_open = false;
    }
}

/// Error de guardado tal como se presenta al usuario
pub fn save_failure(error: StoreError) -> AppError {
    match error {
        StoreError::NotFound(id) => {
            AppError::NotFound(format!("{} (vehicle {} not found)", SAVE_FAILED_MESSAGE, id))
        }
        other => other.into(),
    }
}

fn compare_by(field: SortField, a: &Vehicle, b: &Vehicle) -> Ordering {
    match field {
        SortField::VehicleName => a
            .vehicle_name
            .to_lowercase()
            .cmp(&b.vehicle_name.to_lowercase()),
        SortField::LastSeen => a.last_seen.cmp(&b.last_seen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatencyConfig;
    use crate::models::dashboard::PanelMode;
    use crate::models::vehicle::{Telemetry, VehicleStatus};
    use crate::repositories::seed::seed_vehicles;
    use crate::repositories::InMemoryVehicleStore;
    use chrono::{TimeZone, Utc};

    fn loaded() -> FleetDashboard {
        let mut dashboard = FleetDashboard::new();
        dashboard.finish_load(Ok(seed_vehicles().unwrap()));
        dashboard
    }

    fn vehicle(id: &str, name: &str, status: VehicleStatus, hour: u32) -> Vehicle {
        Vehicle {
            id: id.to_string(),
            vehicle_name: name.to_string(),
            model: "T-1".to_string(),
            status,
            last_seen: Utc.with_ymd_and_hms(2025, 11, 18, hour, 0, 0).unwrap(),
            location: "Pune".to_string(),
            telemetry: Telemetry {
                speed: 0.0,
                battery: 50.0,
            },
            activity: Vec::new(),
        }
    }

    fn ids(items: &[&Vehicle]) -> Vec<String> {
        items.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_starts_loading_and_empty() {
        let dashboard = FleetDashboard::new();
        assert!(dashboard.is_loading());
        assert!(dashboard.vehicles().is_empty());
        assert_eq!(dashboard.total_pages(), 0);
        assert!(!dashboard.has_next_page());
        assert!(!dashboard.has_previous_page());
    }

    #[test]
    fn test_failed_load_keeps_list_and_stops_loading() {
        let mut dashboard = FleetDashboard::new();
        dashboard.finish_load(Err(StoreError::NotFound("*".to_string())));
        assert!(!dashboard.is_loading());
        assert!(dashboard.vehicles().is_empty());
    }

    #[test]
    fn test_status_partitions_sum_to_base() {
        let mut dashboard = loaded();

        dashboard.set_status_filter(StatusFilter::Online);
        let online = dashboard.filtered_and_sorted().len();
        dashboard.set_status_filter(StatusFilter::Offline);
        let offline = dashboard.filtered_and_sorted().len();
        dashboard.set_status_filter(StatusFilter::All);
        let all = ids(&dashboard.filtered_and_sorted());

        assert_eq!(online, 5);
        assert_eq!(offline, 3);
        assert_eq!(online + offline, dashboard.vehicles().len());
        let base: Vec<String> = dashboard.vehicles().iter().map(|v| v.id.clone()).collect();
        assert_eq!(all, base);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut dashboard = loaded();
        dashboard.set_search_term("swift");
        let found = dashboard.filtered_and_sorted();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "V1003");
        assert_eq!(found[0].vehicle_name, "Swift Runner");

        dashboard.set_search_term("CITY");
        assert_eq!(ids(&dashboard.filtered_and_sorted()), vec!["V1002", "V1008"]);
    }

    #[test]
    fn test_search_and_filter_combine() {
        let mut dashboard = loaded();
        dashboard.set_search_term("city");
        dashboard.set_status_filter(StatusFilter::Offline);
        assert_eq!(ids(&dashboard.filtered_and_sorted()), vec!["V1002"]);
    }

    #[test]
    fn test_sort_last_seen_descending_puts_metro_cruiser_first() {
        let mut dashboard = loaded();
        dashboard.toggle_sort(SortField::LastSeen);
        dashboard.toggle_sort(SortField::LastSeen);
        assert_eq!(dashboard.sort_order(), SortOrder::Desc);

        let sorted = dashboard.filtered_and_sorted();
        assert_eq!(sorted[0].id, "V1005");
        assert_eq!(sorted[0].vehicle_name, "Metro Cruiser");
        assert_eq!(sorted.last().map(|v| v.id.as_str()), Some("V1007"));
    }

    #[test]
    fn test_name_sort_directions_are_reversed() {
        let mut dashboard = loaded();
        dashboard.toggle_sort(SortField::VehicleName);
        let ascending = ids(&dashboard.filtered_and_sorted());
        dashboard.toggle_sort(SortField::VehicleName);
        let mut descending = ids(&dashboard.filtered_and_sorted());
        descending.reverse();

        assert_eq!(ascending, descending);
        assert_eq!(ascending[0], "V1001");
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut dashboard = FleetDashboard::new();
        dashboard.finish_load(Ok(vec![
            vehicle("A", "same", VehicleStatus::Online, 9),
            vehicle("B", "Zeta", VehicleStatus::Online, 9),
            vehicle("C", "SAME", VehicleStatus::Online, 9),
            vehicle("D", "alpha", VehicleStatus::Online, 9),
        ]));

        dashboard.toggle_sort(SortField::VehicleName);
        assert_eq!(ids(&dashboard.filtered_and_sorted()), vec!["D", "A", "C", "B"]);

        dashboard.toggle_sort(SortField::VehicleName);
        assert_eq!(ids(&dashboard.filtered_and_sorted()), vec!["B", "A", "C", "D"]);

        dashboard.toggle_sort(SortField::LastSeen);
        assert_eq!(dashboard.sort_order(), SortOrder::Asc);
        assert_eq!(ids(&dashboard.filtered_and_sorted()), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_switching_sort_column_resets_to_ascending() {
        let mut dashboard = loaded();
        dashboard.toggle_sort(SortField::VehicleName);
        dashboard.toggle_sort(SortField::VehicleName);
        assert_eq!(dashboard.sort_order(), SortOrder::Desc);

        dashboard.toggle_sort(SortField::LastSeen);
        assert_eq!(dashboard.sort_field(), Some(SortField::LastSeen));
        assert_eq!(dashboard.sort_order(), SortOrder::Asc);
    }

    #[test]
    fn test_pagination_bounds() {
        let mut dashboard = loaded();
        assert_eq!(dashboard.total_pages(), 2);
        assert_eq!(dashboard.page_items().len(), 5);
        assert!(!dashboard.has_previous_page());
        assert!(dashboard.has_next_page());

        dashboard.previous_page();
        assert_eq!(dashboard.current_page(), 1);

        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 2);
        assert_eq!(ids(&dashboard.page_items()), vec!["V1006", "V1007", "V1008"]);
        assert!(dashboard.has_previous_page());
        assert!(!dashboard.has_next_page());

        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 2);
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut dashboard = loaded();
        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 2);

        dashboard.set_status_filter(StatusFilter::Offline);
        assert_eq!(dashboard.current_page(), 1);

        dashboard.set_status_filter(StatusFilter::All);
        dashboard.next_page();
        dashboard.set_search_term("a");
        assert_eq!(dashboard.current_page(), 1);
    }

    #[test]
    fn test_sort_does_not_reset_page() {
        let mut dashboard = loaded();
        dashboard.next_page();
        dashboard.toggle_sort(SortField::VehicleName);
        assert_eq!(dashboard.current_page(), 2);
    }

    #[test]
    fn test_add_vehicle_prepends_even_with_duplicate_id() {
        let mut dashboard = loaded();
        dashboard.open_add_form();

        dashboard.add_vehicle(vehicle("V1005", "Clone Cruiser", VehicleStatus::Offline, 7));

        assert_eq!(dashboard.vehicles().len(), 9);
        assert_eq!(dashboard.vehicles()[0].vehicle_name, "Clone Cruiser");
        assert!(!dashboard.is_add_form_open());
    }

    #[test]
    fn test_update_replaces_matching_rows_and_selection() {
        let mut dashboard = loaded();
        dashboard.select_vehicle("V1002").unwrap();

        let mut updated = dashboard.vehicles()[1].clone();
        updated.status = VehicleStatus::Online;
        dashboard.handle_vehicle_update(updated);

        assert_eq!(dashboard.vehicles()[1].status, VehicleStatus::Online);
        assert_eq!(
            dashboard.selected_vehicle().map(|v| v.status),
            Some(VehicleStatus::Online)
        );
    }

    #[test]
    fn test_select_unknown_vehicle() {
        let mut dashboard = loaded();
        assert!(dashboard.select_vehicle("V0000").is_none());
        assert!(dashboard.detail().is_none());
        assert_eq!(dashboard.begin_save().unwrap_err(), PanelError::NoSelection);
    }

    #[tokio::test]
    async fn test_save_flow_against_store() {
        let store = InMemoryVehicleStore::new(seed_vehicles().unwrap(), LatencyConfig::zero()).unwrap();
        let mut dashboard = FleetDashboard::new();
        dashboard.load(&store).await;

        dashboard.select_vehicle("V1004").unwrap();
        let panel = dashboard.detail_mut().unwrap();
        panel.begin_edit().unwrap();
        panel
            .set_draft(Some("Urban Express II".to_string()), Some(VehicleStatus::Online))
            .unwrap();

        let saved = dashboard.save_detail(&store).await.unwrap();
        assert_eq!(saved.vehicle_name, "Urban Express II");
        assert_eq!(dashboard.detail().map(|p| p.mode()), Some(PanelMode::Viewing));
        assert_eq!(dashboard.vehicles()[3].vehicle_name, "Urban Express II");

        let stored = store.get_vehicle("V1004").await.unwrap();
        assert_eq!(stored.status, VehicleStatus::Online);
    }

    #[tokio::test]
    async fn test_reload_drops_local_additions() {
        let store = InMemoryVehicleStore::new(seed_vehicles().unwrap(), LatencyConfig::zero()).unwrap();
        let mut dashboard = FleetDashboard::new();
        dashboard.load(&store).await;

        dashboard.add_vehicle(vehicle("V2001", "Draft Van", VehicleStatus::Online, 8));
        assert_eq!(dashboard.vehicles().len(), 9);

        dashboard.load(&store).await;
        assert_eq!(dashboard.vehicles().len(), 8);
        assert!(dashboard.vehicles().iter().all(|v| v.id != "V2001"));
    }

    #[tokio::test]
    async fn test_next_page_recovers_after_reload_shrinks_list() {
        let store = InMemoryVehicleStore::new(seed_vehicles().unwrap(), LatencyConfig::zero()).unwrap();
        let mut dashboard = FleetDashboard::new();
        dashboard.load(&store).await;
        for (i, id) in ["V2001", "V2002", "V2003"].iter().enumerate() {
            dashboard.add_vehicle(vehicle(id, "Draft Van", VehicleStatus::Online, 8 + i as u32));
        }
        assert_eq!(dashboard.total_pages(), 3);
        dashboard.next_page();
        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 3);

        dashboard.load(&store).await;
        assert_eq!(dashboard.total_pages(), 2);
        assert!(dashboard.page_items().is_empty());
        assert!(dashboard.has_next_page());

        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 2);
        assert_eq!(dashboard.page_items().len(), 3);
        assert!(!dashboard.has_next_page());
    }

    #[tokio::test]
    async fn test_next_page_recovers_after_status_edit_under_filter() {
        let store = InMemoryVehicleStore::new(seed_vehicles().unwrap(), LatencyConfig::zero()).unwrap();
        let mut dashboard = FleetDashboard::new();
        dashboard.load(&store).await;
        dashboard.add_vehicle(vehicle("V2001", "Draft Van", VehicleStatus::Online, 8));
        dashboard.set_status_filter(StatusFilter::Online);
        assert_eq!(dashboard.total_pages(), 2);
        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 2);

        // Un vehículo online pasa a offline y la lista filtrada baja a 5
        let mut updated = dashboard.vehicles()[1].clone();
        assert_eq!(updated.status, VehicleStatus::Online);
        updated.status = VehicleStatus::Offline;
        dashboard.handle_vehicle_update(updated);

        assert_eq!(dashboard.total_pages(), 1);
        assert!(dashboard.page_items().is_empty());
        assert!(dashboard.has_next_page());

        dashboard.next_page();
        assert_eq!(dashboard.current_page(), 1);
        assert_eq!(dashboard.page_items().len(), 5);
    }

    #[tokio::test]
    async fn test_saving_local_only_vehicle_fails_and_stays_editing() {
        let store = InMemoryVehicleStore::new(seed_vehicles().unwrap(), LatencyConfig::zero()).unwrap();
        let mut dashboard = FleetDashboard::new();
        dashboard.load(&store).await;
        dashboard.add_vehicle(vehicle("V2001", "Draft Van", VehicleStatus::Online, 8));

        dashboard.select_vehicle("V2001").unwrap();
        dashboard.detail_mut().unwrap().begin_edit().unwrap();

        let err = dashboard.save_detail(&store).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg.starts_with(SAVE_FAILED_MESSAGE)));

        let panel = dashboard.detail().unwrap();
        assert_eq!(panel.mode(), PanelMode::Editing);
        assert!(panel.last_error().is_some());
    }

    #[test]
    fn test_save_result_applies_after_panel_closed() {
        let mut dashboard = loaded();
        dashboard.select_vehicle("V1001").unwrap();
        dashboard.detail_mut().unwrap().begin_edit().unwrap();
        let (id, _patch) = dashboard.begin_save().unwrap();
        dashboard.close_detail();

        let mut updated = dashboard.vehicles()[0].clone();
        updated.vehicle_name = "Late Answer".to_string();
        dashboard.complete_save(&id, Ok(updated)).unwrap();

        assert!(dashboard.detail().is_none());
        assert_eq!(dashboard.vehicles()[0].vehicle_name, "Late Answer");
    }
}
