//! Stylist screens: roster, create/edit, availability toggle, schedule.

use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;

use super::pages::{ConfirmForm, ConfirmPage, Nav, PageNav, fail_page, redirect, require};
use super::session::SessionContext;
use super::state::HttpState;
use crate::domain::permissions::{Action, Capabilities, Resource};
use crate::domain::stylist::{
    SCHEDULE_DAYS, ScheduleEntry, Stylist, StylistDraft, StylistFilters,
};
use crate::view::render;

/// Filter form on the roster screen.
#[derive(Debug, Default, Deserialize)]
pub struct StylistListQuery {
    page: Option<u32>,
    is_available: Option<bool>,
    search: Option<String>,
}

impl StylistListQuery {
    fn filters(&self) -> StylistFilters {
        StylistFilters {
            page: self.page,
            is_available: self.is_available,
            search: self.search.clone().filter(|s| !s.trim().is_empty()),
            ..StylistFilters::default()
        }
    }

    fn href_template(&self) -> String {
        let mut href = String::from("/stylists?page={page}");
        if let Some(available) = self.is_available {
            href.push_str(&format!("&is_available={available}"));
        }
        if let Some(search) = &self.search {
            href.push_str("&search=");
            href.push_str(search);
        }
        href
    }
}

struct StylistRow {
    id: String,
    name: String,
    specialties: String,
    experience: String,
    rating: String,
    bookings: String,
    is_available: bool,
}

fn stylist_row(stylist: &Stylist) -> StylistRow {
    StylistRow {
        id: stylist.id.clone(),
        name: stylist.display_name().to_owned(),
        specialties: stylist.specialties.join(", "),
        experience: format!("{} tahun", stylist.experience),
        rating: format!("{:.1} ({} ulasan)", stylist.rating, stylist.total_reviews),
        bookings: stylist.total_bookings.to_string(),
        is_available: stylist.is_available,
    }
}

/// The roster screen.
#[derive(Template)]
#[template(path = "stylists/list.html")]
struct StylistListPage {
    nav: Nav,
    rows: Vec<StylistRow>,
    page_nav: PageNav,
    can_create: bool,
    can_update: bool,
}

/// `GET /stylists`.
pub async fn list(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<StylistListQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .stylists
        .list(&auth.tokens.token, &query.filters())
        .await
    {
        Ok(page) => {
            let caps = Capabilities::for_user(&auth.user);
            render(StylistListPage {
                nav: Nav::for_auth(&auth),
                rows: page.items.iter().map(stylist_row).collect(),
                page_nav: PageNav::new(&page.info, &query.href_template()),
                can_create: caps.can(Resource::Stylists, Action::Create),
                can_update: caps.can(Resource::Stylists, Action::Update),
            })
        }
        Err(error) => fail_page(&session, &auth, &error, "/stylists"),
    }
}

/// Weekly schedule row for the detail screen.
struct ScheduleRow {
    day: &'static str,
    working: bool,
    hours: String,
}

fn schedule_rows(schedule: &BTreeMap<String, ScheduleEntry>) -> Vec<ScheduleRow> {
    SCHEDULE_DAYS
        .iter()
        .map(|day| match schedule.get(*day) {
            Some(entry) if entry.is_working => ScheduleRow {
                day,
                working: true,
                hours: format!("{} - {}", entry.start_time, entry.end_time),
            },
            _ => ScheduleRow {
                day,
                working: false,
                hours: "Libur".to_owned(),
            },
        })
        .collect()
}

/// The stylist detail screen with the weekly schedule.
#[derive(Template)]
#[template(path = "stylists/detail.html")]
struct StylistDetailPage {
    nav: Nav,
    id: String,
    name: String,
    specialties: String,
    experience: String,
    rating: String,
    commission: String,
    bio: String,
    is_available: bool,
    schedule: Vec<ScheduleRow>,
    /// Shifts for the selected date, when one was picked.
    day_date: String,
    day_shifts: Vec<String>,
    can_update: bool,
}

/// Optional date picker on the detail screen.
#[derive(Debug, Default, Deserialize)]
pub struct StylistDetailQuery {
    date: Option<chrono::NaiveDate>,
}

/// `GET /stylists/{id}`.
pub async fn detail(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<StylistDetailQuery>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Read) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    let stylist = match state.stylists.get(&auth.tokens.token, &id).await {
        Ok(stylist) => stylist,
        Err(error) => return fail_page(&session, &auth, &error, "/stylists"),
    };
    let (day_date, day_shifts) = match query.date {
        Some(date) => {
            match state.stylists.schedule(&auth.tokens.token, &id, date).await {
                Ok(entries) => (
                    crate::view::format::format_date(date),
                    entries
                        .iter()
                        .filter(|entry| entry.is_working)
                        .map(|entry| format!("{} - {}", entry.start_time, entry.end_time))
                        .collect(),
                ),
                Err(error) => return fail_page(&session, &auth, &error, "/stylists"),
            }
        }
        None => (String::new(), Vec::new()),
    };
    let caps = Capabilities::for_user(&auth.user);
    render(StylistDetailPage {
        nav: Nav::for_auth(&auth),
        id: stylist.id.clone(),
        name: stylist.display_name().to_owned(),
        specialties: stylist.specialties.join(", "),
        experience: format!("{} tahun", stylist.experience),
        rating: format!("{:.1} ({} ulasan)", stylist.rating, stylist.total_reviews),
        commission: format!("{:.0}%", stylist.commission_rate),
        bio: stylist.bio.clone().unwrap_or_default(),
        is_available: stylist.is_available,
        schedule: schedule_rows(&stylist.schedule),
        day_date,
        day_shifts,
        can_update: caps.can(Resource::Stylists, Action::Update),
    })
}

/// The create/edit form screen.
#[derive(Template)]
#[template(path = "stylists/form.html")]
struct StylistFormPage {
    nav: Nav,
    action_href: String,
    heading: &'static str,
    user_id: String,
    specialties: String,
    experience: u32,
    commission_rate: f64,
    bio: String,
    is_create: bool,
    error: Option<String>,
}

/// `GET /stylists/new`.
pub async fn new_form(session: SessionContext) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    render(StylistFormPage {
        nav: Nav::for_auth(&auth),
        action_href: "/stylists".to_owned(),
        heading: "Tambah Stylist",
        user_id: String::new(),
        specialties: String::new(),
        experience: 0,
        commission_rate: 10.0,
        bio: String::new(),
        is_create: true,
        error: None,
    })
}

/// `GET /stylists/{id}/edit`.
pub async fn edit_form(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    match state.stylists.get(&auth.tokens.token, &id).await {
        Ok(stylist) => render(StylistFormPage {
            nav: Nav::for_auth(&auth),
            action_href: format!("/stylists/{id}"),
            heading: "Ubah Stylist",
            user_id: stylist.user_id.clone(),
            specialties: stylist.specialties.join(", "),
            experience: stylist.experience,
            commission_rate: stylist.commission_rate,
            bio: stylist.bio.clone().unwrap_or_default(),
            is_create: false,
            error: None,
        }),
        Err(error) => fail_page(&session, &auth, &error, "/stylists"),
    }
}

/// Raw create/edit form fields.
#[derive(Debug, Deserialize)]
pub struct StylistForm {
    user_id: Option<String>,
    specialties: Option<String>,
    experience: Option<u32>,
    commission_rate: Option<f64>,
    bio: Option<String>,
}

impl StylistForm {
    fn draft(self, include_user: bool) -> StylistDraft {
        StylistDraft {
            user_id: if include_user {
                self.user_id.filter(|id| !id.trim().is_empty())
            } else {
                None
            },
            specialties: self
                .specialties
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            experience: self.experience,
            commission_rate: self.commission_rate,
            bio: self.bio.filter(|bio| !bio.trim().is_empty()),
        }
    }
}

/// `POST /stylists`.
pub async fn create(
    session: SessionContext,
    state: web::Data<HttpState>,
    form: web::Form<StylistForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Create) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    match state
        .stylists
        .create(&auth.tokens.token, &form.into_inner().draft(true))
        .await
    {
        Ok(stylist) => redirect(&format!("/stylists/{}", stylist.id)),
        Err(error) => fail_page(&session, &auth, &error, "/stylists/new"),
    }
}

/// `POST /stylists/{id}`.
pub async fn update(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<StylistForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    match state
        .stylists
        .update(&auth.tokens.token, &id, &form.into_inner().draft(false))
        .await
    {
        Ok(_) => redirect(&format!("/stylists/{id}")),
        Err(error) => fail_page(&session, &auth, &error, &format!("/stylists/{id}/edit")),
    }
}

/// `POST /stylists/{id}/toggle-availability`.
pub async fn toggle_availability(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ConfirmForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    if !form.confirmed() {
        return render(ConfirmPage {
            nav: Nav::for_auth(&auth),
            title: "Ubah ketersediaan stylist ini?".to_owned(),
            message: "Stylist yang tidak tersedia tidak muncul saat booking.".to_owned(),
            action_href: format!("/stylists/{id}/toggle-availability"),
            cancel_href: "/stylists".to_owned(),
            ask_reason: false,
        });
    }
    match state
        .stylists
        .toggle_availability(&auth.tokens.token, &id)
        .await
    {
        Ok(_) => redirect("/stylists"),
        Err(error) => fail_page(&session, &auth, &error, "/stylists"),
    }
}

/// Raw schedule form fields.
#[derive(Debug, Deserialize)]
pub struct ScheduleForm {
    day: String,
    is_working: Option<String>,
    start_time: String,
    end_time: String,
}

/// `POST /stylists/{id}/schedules`.
pub async fn add_schedule(
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<ScheduleForm>,
) -> HttpResponse {
    let auth = match require(&session, Resource::Stylists, Action::Update) {
        Ok(auth) => auth,
        Err(response) => return response,
    };
    let id = path.into_inner();
    let form = form.into_inner();
    if !SCHEDULE_DAYS.contains(&form.day.as_str()) {
        return fail_page(
            &session,
            &auth,
            &crate::domain::ports::GatewayError::rejected("Hari tidak dikenal"),
            &format!("/stylists/{id}"),
        );
    }
    let entry = ScheduleEntry {
        is_working: form.is_working.is_some(),
        start_time: form.start_time,
        end_time: form.end_time,
    };
    match state
        .stylists
        .add_schedule(&auth.tokens.token, &id, &form.day, &entry)
        .await
    {
        Ok(_) => redirect(&format!("/stylists/{id}")),
        Err(error) => fail_page(&session, &auth, &error, &format!("/stylists/{id}")),
    }
}
