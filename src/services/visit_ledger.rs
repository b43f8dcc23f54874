//! Visit ledger
//!
//! Este módulo contiene la regla de transición que se aplica en cada visita
//! registrada: creación de la línea del ledger, incremento de contadores,
//! elegibilidad de comisión y reinicio de racha después del pago.
//!
//! La regla es pura: produce un `VisitUpdate` explícito que el repository
//! aplica con una actualización condicional (ver `DriverRepository::apply_visit`).

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::driver::Driver;

/// Número de visitas consecutivas al mismo dhaba que habilita la comisión
pub const COMMISSION_THRESHOLD: i32 = 4;

/// Evento de visita ya validado por la capa de entrada
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub name: String,
    pub mobile: String,
    pub dl_no: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub last_visited_dhaba: String,
}

/// Descripción explícita de la actualización a aplicar sobre una línea
/// existente del ledger
///
/// `expected_total_visits` es el valor leído durante el lookup y actúa como
/// guard de la actualización condicional: si otro proceso registró una visita
/// entre el lookup y el write, el UPDATE no matchea ninguna fila.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitUpdate {
    pub name: String,
    pub mobile: String,
    pub vehicle_number: String,
    pub vehicle_type: String,
    pub last_visited_dhaba: String,
    pub visits: i32,
    pub total_visits: i32,
    pub eligible_for_commission: bool,
    pub commission_received: bool,
    pub expected_total_visits: i32,
}

/// Derivar el driver_id cosmético: 3 primeros caracteres del dhaba en
/// mayúsculas + timestamp de creación en milisegundos
pub fn derive_driver_id(dhaba: &str, at: DateTime<Utc>) -> String {
    let prefix: String = dhaba.chars().take(3).collect::<String>().to_uppercase();
    format!("{}-{}", prefix, at.timestamp_millis())
}

/// Primera visita de un par (dl_no, dhaba): crea la línea del ledger con
/// visits = total_visits = 1 y ambos flags de comisión en false
pub fn first_visit(event: &VisitEvent, at: DateTime<Utc>) -> Driver {
    Driver {
        id: Uuid::new_v4(),
        driver_id: derive_driver_id(&event.last_visited_dhaba, at),
        name: event.name.clone(),
        mobile: event.mobile.clone(),
        dl_no: event.dl_no.clone(),
        vehicle_number: event.vehicle_number.clone(),
        vehicle_type: event.vehicle_type.clone(),
        last_visited_dhaba: event.last_visited_dhaba.clone(),
        visits: 1,
        total_visits: 1,
        eligible_for_commission: false,
        commission_received: false,
        created_at: at,
    }
}

/// Visita siguiente sobre una línea existente del ledger
///
/// En orden:
/// 1. Incrementa visits y total_visits.
/// 2. Los datos de contacto/vehículo siempre reflejan la visita más reciente.
/// 3. Al llegar a COMMISSION_THRESHOLD la línea queda elegible.
/// 4. Pasado el umbral, y solo si la comisión ya fue confirmada como pagada,
///    la racha se reinicia a 1 con ambos flags en false: la misma visita
///    abre el nuevo ciclo.
///
/// Sin confirmación de pago no hay reinicio: visits sigue creciendo (5, 6,
/// 7, ...) y la elegibilidad se mantiene hasta la visita posterior a la
/// confirmación. total_visits nunca se reinicia.
pub fn next_visit(current: &Driver, event: &VisitEvent) -> VisitUpdate {
    let new_visits = current.visits + 1;
    let new_total_visits = current.total_visits + 1;

    let (visits, eligible_for_commission, commission_received) =
        if new_visits > COMMISSION_THRESHOLD && current.commission_received {
            (1, false, false)
        } else if new_visits == COMMISSION_THRESHOLD {
            (new_visits, true, current.commission_received)
        } else {
            (
                new_visits,
                current.eligible_for_commission,
                current.commission_received,
            )
        };

    VisitUpdate {
        name: event.name.clone(),
        mobile: event.mobile.clone(),
        vehicle_number: event.vehicle_number.clone(),
        vehicle_type: event.vehicle_type.clone(),
        last_visited_dhaba: event.last_visited_dhaba.clone(),
        visits,
        total_visits: new_total_visits,
        eligible_for_commission,
        commission_received,
        expected_total_visits: current.total_visits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event(dhaba: &str) -> VisitEvent {
        VisitEvent {
            name: "Ramesh Kumar".to_string(),
            mobile: "9876543210".to_string(),
            dl_no: "DL0123456789012".to_string(),
            vehicle_number: "HR26AB1234".to_string(),
            vehicle_type: "Truck".to_string(),
            last_visited_dhaba: dhaba.to_string(),
        }
    }

    fn apply(driver: &mut Driver, event: &VisitEvent) {
        let update = next_visit(driver, event);
        driver.name = update.name;
        driver.mobile = update.mobile;
        driver.vehicle_number = update.vehicle_number;
        driver.vehicle_type = update.vehicle_type;
        driver.last_visited_dhaba = update.last_visited_dhaba;
        driver.visits = update.visits;
        driver.total_visits = update.total_visits;
        driver.eligible_for_commission = update.eligible_for_commission;
        driver.commission_received = update.commission_received;
    }

    #[test]
    fn test_first_visit_initial_state() {
        let event = sample_event("Amrik Sukhdev Dhaba, Murthal");
        let driver = first_visit(&event, Utc::now());

        assert_eq!(driver.visits, 1);
        assert_eq!(driver.total_visits, 1);
        assert!(!driver.eligible_for_commission);
        assert!(!driver.commission_received);
        assert_eq!(driver.dl_no, "DL0123456789012");
        assert_eq!(driver.last_visited_dhaba, "Amrik Sukhdev Dhaba, Murthal");
    }

    #[test]
    fn test_derive_driver_id_format() {
        let at = DateTime::parse_from_rfc3339("2025-08-07T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let id = derive_driver_id("Amrik Sukhdev Dhaba, Murthal", at);
        assert_eq!(id, format!("AMR-{}", at.timestamp_millis()));

        let id = derive_driver_id("pahalwan", at);
        assert!(id.starts_with("PAH-"));
    }

    #[test]
    fn test_visits_accumulate_without_acknowledgment() {
        let event = sample_event("Zhilmil Dhaba, Karnal");
        let mut driver = first_visit(&event, Utc::now());

        // Sin confirmación de pago nunca hay reinicio, ni después de 4
        for n in 2..=8 {
            apply(&mut driver, &event);
            assert_eq!(driver.visits, n);
            assert_eq!(driver.total_visits, n);
            assert!(!driver.commission_received);
        }
        assert!(driver.eligible_for_commission);
    }

    #[test]
    fn test_eligibility_turns_on_exactly_at_threshold() {
        let event = sample_event("Rao Dhaba, Gurgaon");
        let mut driver = first_visit(&event, Utc::now());

        apply(&mut driver, &event);
        apply(&mut driver, &event);
        assert_eq!(driver.visits, 3);
        assert!(!driver.eligible_for_commission);

        apply(&mut driver, &event);
        assert_eq!(driver.visits, 4);
        assert!(driver.eligible_for_commission);

        // Se mantiene encendida pasado el umbral
        apply(&mut driver, &event);
        assert_eq!(driver.visits, 5);
        assert!(driver.eligible_for_commission);
    }

    #[test]
    fn test_reset_law_after_acknowledgment() {
        let event = sample_event("Bhartu Da Dhaba, Sonipat");
        let mut driver = first_visit(&event, Utc::now());
        for _ in 0..3 {
            apply(&mut driver, &event);
        }
        assert_eq!(driver.visits, 4);
        assert!(driver.eligible_for_commission);

        // El operador confirma el pago
        driver.commission_received = true;

        let before_total = driver.total_visits;
        apply(&mut driver, &event);

        assert_eq!(driver.visits, 1);
        assert!(!driver.eligible_for_commission);
        assert!(!driver.commission_received);
        assert_eq!(driver.total_visits, before_total + 1);
    }

    #[test]
    fn test_late_acknowledgment_resets_on_next_visit() {
        let event = sample_event("Mannat Dhaba, Kurukshetra");
        let mut driver = first_visit(&event, Utc::now());
        for _ in 0..6 {
            apply(&mut driver, &event);
        }
        // 7 visitas sin pago: la racha sigue abierta
        assert_eq!(driver.visits, 7);
        assert!(driver.eligible_for_commission);

        driver.commission_received = true;
        apply(&mut driver, &event);

        assert_eq!(driver.visits, 1);
        assert_eq!(driver.total_visits, 8);
        assert!(!driver.eligible_for_commission);
        assert!(!driver.commission_received);
    }

    #[test]
    fn test_total_visits_is_monotonic_across_resets() {
        let event = sample_event("Sitara Dhaba, Panipat");
        let mut driver = first_visit(&event, Utc::now());

        let mut previous_total = driver.total_visits;
        for _ in 0..3 {
            for _ in 0..4 {
                apply(&mut driver, &event);
                assert!(driver.total_visits > previous_total);
                previous_total = driver.total_visits;
            }
            if driver.eligible_for_commission {
                driver.commission_received = true;
            }
        }
        assert_eq!(driver.total_visits, 13);
    }

    #[test]
    fn test_contact_and_vehicle_reflect_latest_visit() {
        let event = sample_event("Pahalwan Dhaba, Rohtak");
        let mut driver = first_visit(&event, Utc::now());

        let mut updated = sample_event("Pahalwan Dhaba, Rohtak");
        updated.name = "Suresh Singh".to_string();
        updated.mobile = "9123456780".to_string();
        updated.vehicle_number = "PB10C4567".to_string();
        updated.vehicle_type = "Van".to_string();

        apply(&mut driver, &updated);

        assert_eq!(driver.name, "Suresh Singh");
        assert_eq!(driver.mobile, "9123456780");
        assert_eq!(driver.vehicle_number, "PB10C4567");
        assert_eq!(driver.vehicle_type, "Van");
        // La identidad del ledger no cambia
        assert_eq!(driver.dl_no, "DL0123456789012");
    }

    #[test]
    fn test_update_carries_expected_total_for_conditional_write() {
        let event = sample_event("Gulshan Ka Dhaba, Ambala");
        let mut driver = first_visit(&event, Utc::now());
        apply(&mut driver, &event);
        assert_eq!(driver.total_visits, 2);

        let update = next_visit(&driver, &event);
        assert_eq!(update.expected_total_visits, 2);
        assert_eq!(update.total_visits, 3);
    }

    #[test]
    fn test_end_to_end_scenario_four_visits_ack_then_fifth() {
        // Escenario completo: 4 visitas, confirmación de pago, quinta visita
        let event = sample_event("Amrik Sukhdev Dhaba, Murthal");
        let mut driver = first_visit(&event, Utc::now());
        for _ in 0..3 {
            apply(&mut driver, &event);
        }

        assert_eq!(driver.visits, 4);
        assert_eq!(driver.total_visits, 4);
        assert!(driver.eligible_for_commission);
        assert!(!driver.commission_received);

        driver.commission_received = true;

        apply(&mut driver, &event);
        assert_eq!(driver.visits, 1);
        assert_eq!(driver.total_visits, 5);
        assert!(!driver.eligible_for_commission);
        assert!(!driver.commission_received);
    }
}
