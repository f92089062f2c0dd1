//! Tests contra PostgreSQL
//!
//! Requieren `DATABASE_URL`; se ejecutan con `cargo test -- --ignored`.
//! `#[sqlx::test]` crea una base nueva por test y aplica `migrations/`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use forge_ledger::{
    controllers::{
        fuel_price_controller::FuelPriceController, fuel_statistics_controller::FuelStatisticsController,
        gas_station_controller::GasStationController, payment_template_controller::PaymentTemplateController,
        recurring_payment_controller::RecurringPaymentController, refueling_controller::RefuelingController,
        utility_controller::UtilityController, vehicle_controller::VehicleController,
    },
    dto::{
        fuel_price_dto::{CreateFuelPriceRequest, FuelPriceFilters},
        fuel_statistics_dto::{FuelStatisticsFilters, RebuildStatisticsRequest},
        gas_station_dto::CreateGasStationRequest,
        refueling_dto::{CreateRefuelingRequest, UpdateRefuelingRequest},
        utility_dto::{
            ApplyTemplateRequest, CreateCompanyRequest, CreatePaymentRequest, CreateRecurringPaymentRequest,
            CreateTemplateRequest, SummaryQuery,
        },
        vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest},
    },
    models::{utility::PaymentStatus, Bank, FuelType, PeriodType},
    utils::errors::AppError,
};

fn date(s: &str) -> chrono::NaiveDate {
    s.parse().unwrap()
}

async fn create_vehicle(pool: &PgPool, initial_odometer: i32) -> Uuid {
    let controller = VehicleController::new(pool.clone());
    let response = controller
        .create(CreateVehicleRequest {
            name: "Рабочая".to_string(),
            brand: Some("Lada".to_string()),
            model: Some("Vesta".to_string()),
            year: Some(2020),
            license_plate: Some("A123BC77".to_string()),
            initial_odometer: Some(initial_odometer),
            is_active: None,
        })
        .await
        .unwrap();
    response.data.unwrap().id
}

fn refuel(vehicle_id: Uuid, on: &str, mileage: i32) -> CreateRefuelingRequest {
    CreateRefuelingRequest {
        vehicle_id,
        gas_station_id: None,
        date: date(on),
        month: None,
        quarter: None,
        mileage,
        fuel_quantity: Decimal::from(40),
        price_per_liter: Decimal::from(50),
        total_cost: None,
        discount: Some(Decimal::from(200)),
        fuel_type: Some(FuelType::Ai95),
        is_full_tank: Some(true),
        comment: None,
    }
}

async fn current_odometer(pool: &PgPool, vehicle_id: Uuid) -> i32 {
    VehicleController::new(pool.clone())
        .get_by_id(vehicle_id)
        .await
        .unwrap()
        .current_odometer
}

#[sqlx::test]
#[ignore]
async fn test_odometers_follow_the_ledger(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool, 1000).await;
    let controller = RefuelingController::new(pool.clone());

    let a = controller.create(refuel(vehicle_id, "2024-05-10", 200)).await.unwrap().data.unwrap();
    let b = controller.create(refuel(vehicle_id, "2024-05-17", 150)).await.unwrap().data.unwrap();

    assert_eq!(a.odometer, 1200);
    assert_eq!(b.odometer, 1350);
    assert_eq!(current_odometer(&pool, vehicle_id).await, 1350);

    assert_eq!(b.total_cost, Some(Decimal::from(2000)));
    assert_eq!(b.effective_cost, Decimal::from(1800));
    assert_eq!((b.month, b.quarter), (Some(5), Some(2)));

    let ledger = controller.list_for_vehicle(vehicle_id).await.unwrap();
    let odometers: Vec<i64> = ledger.iter().map(|r| r.odometer).collect();
    assert_eq!(odometers, vec![1200, 1350]);
}

#[sqlx::test]
#[ignore]
async fn test_update_and_delete_recompute_current_odometer(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool, 1000).await;
    let controller = RefuelingController::new(pool.clone());

    let a = controller.create(refuel(vehicle_id, "2024-05-10", 200)).await.unwrap().data.unwrap();
    let b = controller.create(refuel(vehicle_id, "2024-05-17", 150)).await.unwrap().data.unwrap();

    let updated = controller
        .update(
            a.id,
            UpdateRefuelingRequest {
                mileage: Some(250),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(updated.odometer, 1250);
    assert_eq!(current_odometer(&pool, vehicle_id).await, 1400);

    controller.delete(a.id).await.unwrap();
    assert_eq!(current_odometer(&pool, vehicle_id).await, 1150);
    assert_eq!(controller.get_by_id(b.id).await.unwrap().odometer, 1150);
}

#[sqlx::test]
#[ignore]
async fn test_initial_odometer_change_recomputes_cache(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool, 1000).await;
    RefuelingController::new(pool.clone())
        .create(refuel(vehicle_id, "2024-05-10", 200))
        .await
        .unwrap();

    let response = VehicleController::new(pool.clone())
        .update(
            vehicle_id,
            UpdateVehicleRequest {
                name: None,
                brand: None,
                model: None,
                year: None,
                license_plate: None,
                initial_odometer: Some(5000),
                is_active: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(response.data.unwrap().current_odometer, 5200);
}

#[sqlx::test]
#[ignore]
async fn test_backdated_create_is_rejected(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool, 0).await;
    let controller = RefuelingController::new(pool.clone());

    controller.create(refuel(vehicle_id, "2024-05-17", 100)).await.unwrap();

    let same_day = controller.create(refuel(vehicle_id, "2024-05-17", 50)).await;
    assert!(same_day.is_ok());

    let earlier = controller.create(refuel(vehicle_id, "2024-05-01", 50)).await;
    match earlier {
        Err(AppError::Validation(errors)) => {
            assert!(errors.field_errors().contains_key("date"));
        }
        other => panic!("expected a date validation error, got {:?}", other.map(|_| ())),
    }

    assert_eq!(current_odometer(&pool, vehicle_id).await, 150);
}

#[sqlx::test]
#[ignore]
async fn test_unknown_vehicle_is_a_field_error(pool: PgPool) {
    let result = RefuelingController::new(pool.clone())
        .create(refuel(Uuid::new_v4(), "2024-05-17", 100))
        .await;

    match result {
        Err(AppError::Validation(errors)) => {
            assert!(errors.field_errors().contains_key("vehicle_id"));
        }
        other => panic!("expected a vehicle_id error, got {:?}", other.map(|_| ())),
    }
}

#[sqlx::test]
#[ignore]
async fn test_duplicate_fuel_price_conflicts(pool: PgPool) {
    let controller = FuelPriceController::new(pool.clone());
    let request = || CreateFuelPriceRequest {
        date: date("2024-05-17"),
        fuel_type: FuelType::Ai95,
        price: Decimal::new(5690, 2),
        gas_station_id: None,
    };

    controller.create(request()).await.unwrap();
    let duplicate = controller.create(request()).await;

    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[sqlx::test]
#[ignore]
async fn test_monthly_summary(pool: PgPool) {
    let controller = UtilityController::new(pool.clone());
    let payment = |price: i64, is_paid: bool| CreatePaymentRequest {
        date: date("2024-03-05"),
        month: None,
        quarter: None,
        company_id: None,
        company_name: Some("Мосэнергосбыт".to_string()),
        description: "Электроэнергия".to_string(),
        price: Decimal::from(price),
        is_paid: Some(is_paid),
        billing_statement: None,
        bank: None,
        needs_payment: None,
        is_reported: None,
        comment: None,
    };

    controller.create_payment(payment(300, true)).await.unwrap();
    controller.create_payment(payment(100, false)).await.unwrap();

    let summary = controller
        .monthly_summary(SummaryQuery {
            year: Some(2024),
            month: Some(3),
        })
        .await
        .unwrap();

    assert_eq!(summary.payment_count, 2);
    assert_eq!(summary.completion_rate, Decimal::from(75));
}

#[sqlx::test]
#[ignore]
async fn test_moving_refueling_recomputes_both_vehicles(pool: PgPool) {
    let first = create_vehicle(&pool, 1000).await;
    let second = create_vehicle(&pool, 5000).await;
    let controller = RefuelingController::new(pool.clone());

    let moved = controller.create(refuel(first, "2024-05-10", 200)).await.unwrap().data.unwrap();
    controller.create(refuel(first, "2024-05-17", 150)).await.unwrap();
    assert_eq!(current_odometer(&pool, first).await, 1350);

    let updated = controller
        .update(
            moved.id,
            UpdateRefuelingRequest {
                vehicle_id: Some(second),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(updated.vehicle_id, second);
    assert_eq!(updated.odometer, 5200);
    assert_eq!(current_odometer(&pool, first).await, 1150);
    assert_eq!(current_odometer(&pool, second).await, 5200);
}

#[sqlx::test]
#[ignore]
async fn test_gas_station_delete_nulls_refuelings_and_drops_prices(pool: PgPool) {
    let station = GasStationController::new(pool.clone())
        .create(CreateGasStationRequest {
            name: "АЗС".to_string(),
            number: Some("12".to_string()),
            address: None,
            company: Some("Лукойл".to_string()),
        })
        .await
        .unwrap()
        .data
        .unwrap();

    let vehicle_id = create_vehicle(&pool, 0).await;
    let refuelings = RefuelingController::new(pool.clone());
    let refueling = refuelings
        .create(CreateRefuelingRequest {
            gas_station_id: Some(station.id),
            ..refuel(vehicle_id, "2024-05-17", 100)
        })
        .await
        .unwrap()
        .data
        .unwrap();
    assert_eq!(refueling.gas_station_id, Some(station.id));

    let prices = FuelPriceController::new(pool.clone());
    prices
        .create(CreateFuelPriceRequest {
            date: date("2024-05-17"),
            fuel_type: FuelType::Ai95,
            price: Decimal::new(5690, 2),
            gas_station_id: Some(station.id),
        })
        .await
        .unwrap();

    GasStationController::new(pool.clone()).delete(station.id).await.unwrap();

    let refueling = refuelings.get_by_id(refueling.id).await.unwrap();
    assert_eq!(refueling.gas_station_id, None);

    let remaining = prices
        .list(FuelPriceFilters {
            gas_station_id: Some(station.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[sqlx::test]
#[ignore]
async fn test_statistics_rebuild_is_idempotent(pool: PgPool) {
    let vehicle_id = create_vehicle(&pool, 0).await;
    let refuelings = RefuelingController::new(pool.clone());
    refuelings.create(refuel(vehicle_id, "2024-05-10", 400)).await.unwrap();
    refuelings.create(refuel(vehicle_id, "2024-05-17", 400)).await.unwrap();

    let controller = FuelStatisticsController::new(pool.clone());
    let request = || RebuildStatisticsRequest {
        vehicle_id,
        period_type: PeriodType::Month,
        date: Some(date("2024-05-20")),
    };

    let first = controller.rebuild(request()).await.unwrap().data.unwrap();
    let second = controller.rebuild(request()).await.unwrap().data.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.period, date("2024-05-01"));
    assert_eq!(second.total_distance, 800);
    assert_eq!(second.total_fuel, Decimal::from(80));
    assert_eq!(second.avg_consumption, Decimal::from(10));

    let rows = controller
        .list(FuelStatisticsFilters {
            vehicle_id: Some(vehicle_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[sqlx::test]
#[ignore]
async fn test_recurring_payments_generate_once_per_month(pool: PgPool) {
    let company = UtilityController::new(pool.clone())
        .create_company(CreateCompanyRequest {
            name: "ИП Петров".to_string(),
            category_name: Some("Аренда".to_string()),
            account_number: None,
        })
        .await
        .unwrap()
        .data
        .unwrap();

    let controller = RecurringPaymentController::new(pool.clone());
    controller
        .create(CreateRecurringPaymentRequest {
            company_id: company.id,
            description: "Аренда гаража".to_string(),
            amount: Decimal::from(8000),
            due_day: 31,
            bank: Some(Bank::Mk2),
            is_active: None,
            auto_create: None,
        })
        .await
        .unwrap();

    let february = || SummaryQuery {
        year: Some(2024),
        month: Some(2),
    };

    let generated = controller.generate(february()).await.unwrap().data.unwrap();
    assert_eq!(generated.len(), 1);
    assert_eq!(generated[0].date, date("2024-02-29"));
    assert_eq!(generated[0].company_name, "ИП Петров");
    assert_eq!(generated[0].status, PaymentStatus::NeedsPayment);

    let again = controller.generate(february()).await.unwrap().data.unwrap();
    assert!(again.is_empty());

    let summary = UtilityController::new(pool.clone())
        .monthly_summary(february())
        .await
        .unwrap();
    assert_eq!(summary.rent_total, Decimal::from(8000));
}

#[sqlx::test]
#[ignore]
async fn test_payment_template_apply(pool: PgPool) {
    let controller = PaymentTemplateController::new(pool.clone());
    let template = controller
        .create(CreateTemplateRequest {
            name: "Свет".to_string(),
            company_name: "Мосэнергосбыт".to_string(),
            description: "Электроэнергия".to_string(),
            default_amount: Some(Decimal::new(245_050, 2)),
            default_bank: Some(Bank::Mk1),
        })
        .await
        .unwrap()
        .data
        .unwrap();

    let payment = controller
        .apply(
            template.id,
            ApplyTemplateRequest {
                date: date("2024-03-05"),
                company_id: None,
                price: None,
                bank: None,
                is_paid: Some(true),
                needs_payment: None,
                comment: None,
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(payment.price, Decimal::new(245_050, 2));
    assert_eq!(payment.bank, Some(Bank::Mk1));
    assert_eq!(payment.bank_label, Some("Сбербанк (MK1)"));
    assert_eq!((payment.month, payment.quarter), (3, 1));
}
