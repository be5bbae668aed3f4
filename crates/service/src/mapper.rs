//! Explicit conversions between the business model and the persistence model.
//!
//! One function per direction and entity, each naming every field. Absent
//! keys become `NotSet` so the store assigns them on insert.

use chrono::Utc;
use sea_orm::ActiveValue::{self, NotSet, Set};
use sea_orm::Value;

use models::{establishment, family, order, product};

use crate::domain::{Address, ContactDetails, Establishment, Family, Order, OrderStatus, Product, ProductState};

fn key<T>(value: &Option<T>) -> ActiveValue<T>
where
    T: Clone + Into<Value>,
{
    match value {
        Some(v) => Set(v.clone()),
        None => NotSet,
    }
}

pub fn establishment_to_record(e: &Establishment) -> establishment::ActiveModel {
    establishment::ActiveModel {
        tax_id: key(&e.tax_id),
        name: Set(e.name.clone()),
        opened_on: Set(e.opened_on),
        street: Set(e.address.street.clone()),
        city: Set(e.address.city.clone()),
        postal_code: Set(e.address.postal_code.clone()),
        province: Set(e.address.province.clone()),
        country: Set(e.address.country.clone()),
        phone: Set(e.contact.phone.clone()),
        email: Set(e.contact.email.clone()),
    }
}

pub fn establishment_from_record(m: establishment::Model) -> Establishment {
    Establishment {
        tax_id: Some(m.tax_id),
        name: m.name,
        opened_on: m.opened_on,
        address: Address {
            street: m.street,
            city: m.city,
            postal_code: m.postal_code,
            province: m.province,
            country: m.country,
        },
        contact: ContactDetails { phone: m.phone, email: m.email },
    }
}

pub fn family_to_record(f: &Family) -> family::ActiveModel {
    family::ActiveModel { id: key(&f.id), name: Set(f.name.clone()) }
}

pub fn family_from_record(m: family::Model) -> Family {
    Family { id: Some(m.id), name: m.name }
}

pub fn order_status_to_record(s: OrderStatus) -> order::Status {
    match s {
        OrderStatus::New => order::Status::New,
        OrderStatus::InProgress => order::Status::InProgress,
        OrderStatus::PendingDelivery => order::Status::PendingDelivery,
        OrderStatus::Delivered => order::Status::Delivered,
        OrderStatus::Cancelled => order::Status::Cancelled,
    }
}

pub fn order_status_from_record(s: order::Status) -> OrderStatus {
    match s {
        order::Status::New => OrderStatus::New,
        order::Status::InProgress => OrderStatus::InProgress,
        order::Status::PendingDelivery => OrderStatus::PendingDelivery,
        order::Status::Delivered => OrderStatus::Delivered,
        order::Status::Cancelled => OrderStatus::Cancelled,
    }
}

pub fn order_to_record(o: &Order) -> order::ActiveModel {
    order::ActiveModel {
        id: key(&o.id),
        placed_at: Set(o.placed_at.into()),
        notes: Set(o.notes.clone()),
        establishment_tax_id: Set(o.establishment_tax_id.clone()),
        employee_id: Set(o.employee_id),
        status: Set(order_status_to_record(o.status)),
    }
}

pub fn order_from_record(m: order::Model) -> Order {
    Order {
        id: Some(m.id),
        placed_at: m.placed_at.with_timezone(&Utc),
        notes: m.notes,
        establishment_tax_id: m.establishment_tax_id,
        employee_id: m.employee_id,
        status: order_status_from_record(m.status),
    }
}

pub fn product_to_record(p: &Product) -> product::ActiveModel {
    product::ActiveModel {
        id: key(&p.id),
        name: Set(p.name.clone()),
        price: Set(p.price),
        created_on: Set(p.created_on),
        description: Set(p.description.clone()),
        family_id: Set(p.family_id),
        delisted: Set(p.is_delisted()),
    }
}

pub fn product_from_record(m: product::Model) -> Product {
    Product {
        id: Some(m.id),
        name: m.name,
        price: m.price,
        created_on: m.created_on,
        description: m.description,
        family_id: m.family_id,
        state: if m.delisted { ProductState::Delisted } else { ProductState::Listed },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use sea_orm::TryIntoModel;

    #[test]
    fn missing_keys_are_not_set() {
        let am = family_to_record(&Family::new("Bebidas"));
        assert!(am.id.is_not_set());
        assert!(matches!(am.name, ActiveValue::Set(ref n) if n == "Bebidas"));

        let am = establishment_to_record(&Establishment { tax_id: None, ..Establishment::default() });
        assert!(am.tax_id.is_not_set());
    }

    #[test]
    fn establishment_round_trip_keeps_nested_fields() -> Result<(), sea_orm::DbErr> {
        let mut e = Establishment::new("B12345678", "Pollos Centro");
        e.opened_on = NaiveDate::from_ymd_opt(2019, 5, 20);
        e.address = Address {
            street: "Gran Via 1".into(),
            city: "Madrid".into(),
            postal_code: "28013".into(),
            province: "Madrid".into(),
            country: "Spain".into(),
        };
        e.contact = ContactDetails { phone: Some("910000000".into()), email: None };

        let record = establishment_to_record(&e).try_into_model()?;
        assert_eq!(record.province, "Madrid");
        assert_eq!(record.phone.as_deref(), Some("910000000"));
        assert_eq!(establishment_from_record(record), e);
        Ok(())
    }

    #[test]
    fn order_round_trip_keeps_status_and_instant() -> Result<(), sea_orm::DbErr> {
        let mut o = Order::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(), "B12345678", 3);
        o.id = Some(9);
        o.notes = Some("sin sal".into());
        o.status = OrderStatus::PendingDelivery;

        let record = order_to_record(&o).try_into_model()?;
        assert_eq!(record.status, order::Status::PendingDelivery);
        assert_eq!(order_from_record(record), o);
        Ok(())
    }

    #[test]
    fn product_state_maps_to_delisted_flag() -> Result<(), sea_orm::DbErr> {
        let mut p = Product::new("Producto A", 15.0, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        p.id = Some(1);
        p.family_id = Some(2);

        let listed = product_to_record(&p).try_into_model()?;
        assert!(!listed.delisted);

        let delisted = product_to_record(&p.clone().delist()).try_into_model()?;
        assert!(delisted.delisted);
        assert_eq!(product_from_record(delisted).state, ProductState::Delisted);
        assert_eq!(product_from_record(listed), p);
        Ok(())
    }
}
