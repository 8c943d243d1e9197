use actix_web::web;

pub mod routes {
    pub mod booking;
    pub mod event;
    pub mod venue;
}

mod services {
    pub(crate) mod access;
    pub(crate) mod booking;
    pub(crate) mod event;
    pub(crate) mod venue;
}

mod dtos {
    pub(crate) mod booking;
    pub(crate) mod event;
    pub(crate) mod venue;
}

/// Public catalog: listing and detail of published events.
pub fn mount_events_public() -> actix_web::Scope {
    web::scope("/events")
        .service(routes::event::get_events)
        .service(routes::event::get_event)
}

/// Organizer/admin event management.
pub fn mount_events_admin() -> actix_web::Scope {
    web::scope("/events")
        .service(routes::event::post_event)
        .service(routes::event::put_event)
        .service(routes::event::post_publish)
        .service(routes::event::delete_event)
}

pub fn mount_venues() -> actix_web::Scope {
    web::scope("/venues")
        .service(routes::venue::get_venues)
        .service(routes::venue::post_venue)
        .service(routes::venue::put_venue)
        .service(routes::venue::delete_venue)
}

pub fn mount_bookings() -> actix_web::Scope {
    web::scope("/bookings")
        .service(routes::booking::post_booking)
        .service(routes::booking::get_bookings)
        .service(routes::booking::delete_booking)
}
