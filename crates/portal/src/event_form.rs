//! Vendor event editor
//!
//! Creates a new event or edits an existing one. Poster images are uploaded
//! first and their hosted URLs travel with the event payload.

use crate::context::PortalContext;
use crate::error::{PortalError, Result};
use chrono::{DateTime, Utc};
use eventmart_api_client::endpoints::vendor::{EventEnvelope, MediaUpload, UploadedMedia};
use eventmart_api_client::{Event, EventStatus, EventUpdate, Location, NewEvent, Page};
use eventmart_core::validation::{FieldErrors, Validator};
use eventmart_query::{vendor, Mutation, Query};
use tracing::debug;

const CREATED: &str = "Event created";
const UPDATED: &str = "Event updated";

/// Editable event values
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub longitude: f64,
    pub latitude: f64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub dates: Vec<DateTime<Utc>>,
    pub price_per_ticket: f64,
    pub max_tickets_per_user: u32,
    pub total_ticket: u32,
    pub poster_images: Vec<String>,
}

impl Default for EventFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            longitude: 0.0,
            latitude: 0.0,
            start_time: None,
            end_time: None,
            dates: Vec::new(),
            price_per_ticket: 0.0,
            max_tickets_per_user: 1,
            total_ticket: 0,
            poster_images: Vec::new(),
        }
    }
}

impl From<&Event> for EventFields {
    fn from(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            category: event.category.clone(),
            longitude: event.location.longitude,
            latitude: event.location.latitude,
            start_time: Some(event.start_time),
            end_time: Some(event.end_time),
            dates: event.date.clone(),
            price_per_ticket: event.price_per_ticket,
            max_tickets_per_user: event.max_tickets_per_user,
            total_ticket: event.total_ticket,
            poster_images: event.poster_image.clone(),
        }
    }
}

/// Validate the event form
pub fn validate_event(fields: &EventFields) -> FieldErrors {
    Validator::new()
        .required("title", &fields.title)
        .max_length("title", &fields.title, 100)
        .required("description", &fields.description)
        .required("category", &fields.category)
        .custom("startTime", || {
            fields
                .start_time
                .is_none()
                .then(|| "Start time is required".to_string())
        })
        .custom("endTime", || match (fields.start_time, fields.end_time) {
            (_, None) => Some("End time is required".to_string()),
            (Some(start), Some(end)) if end <= start => {
                Some("End time must be after the start time".to_string())
            }
            _ => None,
        })
        .custom("date", || {
            fields
                .dates
                .is_empty()
                .then(|| "Pick at least one date".to_string())
        })
        .custom("pricePerTicket", || {
            (!fields.price_per_ticket.is_finite() || fields.price_per_ticket < 0.0)
                .then(|| "Price cannot be negative".to_string())
        })
        .range("totalTicket", fields.total_ticket, 1, u32::MAX)
        .range("maxTicketsPerUser", fields.max_tickets_per_user, 1, u32::MAX)
        .custom("maxTicketsPerUser", || {
            (fields.max_tickets_per_user > fields.total_ticket)
                .then(|| "Cannot exceed the total number of tickets".to_string())
        })
        .range("latitude", fields.latitude, -90.0, 90.0)
        .range("longitude", fields.longitude, -180.0, 180.0)
        .custom("posterImage", || {
            fields
                .poster_images
                .is_empty()
                .then(|| "Upload at least one poster image".to_string())
        })
        .validate()
        .field_errors()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Create,
    Edit { event_id: String, status: EventStatus },
}

pub struct EventForm {
    mode: Mode,
    fields: EventFields,
    errors: FieldErrors,
    create: Mutation<NewEvent, EventEnvelope>,
    update: Mutation<(String, EventUpdate), EventEnvelope>,
    upload: Mutation<MediaUpload, UploadedMedia>,
    ctx: PortalContext,
}

impl EventForm {
    /// Blank form for a new event
    pub fn create(ctx: PortalContext) -> Self {
        Self::build(Mode::Create, EventFields::default(), ctx)
    }

    /// Form prefilled from an existing event
    pub fn edit(ctx: PortalContext, event: &Event) -> Self {
        let mode = Mode::Edit {
            event_id: event.id.clone(),
            status: event.status,
        };
        Self::build(mode, EventFields::from(event), ctx)
    }

    fn build(mode: Mode, fields: EventFields, ctx: PortalContext) -> Self {
        let api = ctx.client.vendor();
        Self {
            mode,
            fields,
            errors: FieldErrors::new(),
            create: vendor::create_event_mutation(api.clone()),
            update: vendor::update_event_mutation(api.clone()),
            upload: vendor::upload_media_mutation(api),
            ctx,
        }
    }

    /// Drop cached pages of `events` whenever this form saves
    pub fn invalidates(&self, events: &Query<Page<Event>>) {
        let on_create = events.clone();
        self.create.on_success(move |_| on_create.invalidate());
        let on_update = events.clone();
        self.update.on_success(move |_| on_update.invalidate());
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, Mode::Edit { .. })
    }

    pub fn fields(&self) -> &EventFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut EventFields {
        &mut self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.create.is_loading() || self.update.is_loading() || self.upload.is_loading()
    }

    /// Upload a poster and attach its URL to the form
    pub async fn upload_poster(&mut self, file_name: &str, bytes: &[u8]) -> Result<String> {
        let upload = MediaUpload::from_bytes(file_name, MediaUpload::content_type_for(file_name), bytes);
        match self.upload.trigger(upload).await {
            Ok(media) => {
                debug!(file_name, url = media.url.as_str(), "Poster uploaded");
                self.fields.poster_images.push(media.url.clone());
                self.errors.remove("posterImage");
                Ok(media.url)
            }
            Err(e) => {
                self.ctx.notifier.error(e.message());
                Err(e.into())
            }
        }
    }

    pub fn remove_poster(&mut self, url: &str) {
        self.fields.poster_images.retain(|u| u != url);
    }

    /// Validate and save
    pub async fn submit(&mut self) -> Result<Event> {
        self.errors = validate_event(&self.fields);
        if !self.errors.is_empty() {
            return Err(PortalError::Invalid(self.errors.clone()));
        }
        let (Some(start_time), Some(end_time)) = (self.fields.start_time, self.fields.end_time) else {
            return Err(PortalError::State("Event times are missing"));
        };
        let f = &self.fields;
        let location = Location {
            longitude: f.longitude,
            latitude: f.latitude,
        };

        let (result, default_message) = match &self.mode {
            Mode::Create => {
                let event = NewEvent {
                    title: f.title.trim().to_string(),
                    description: f.description.trim().to_string(),
                    location,
                    start_time,
                    end_time,
                    poster_image: f.poster_images.clone(),
                    price_per_ticket: f.price_per_ticket,
                    max_tickets_per_user: f.max_tickets_per_user,
                    total_ticket: f.total_ticket,
                    date: f.dates.clone(),
                    category: f.category.trim().to_string(),
                };
                (self.create.trigger(event).await, CREATED)
            }
            Mode::Edit { event_id, status } => {
                let update = EventUpdate {
                    title: f.title.trim().to_string(),
                    description: f.description.trim().to_string(),
                    location: Some(location),
                    start_time,
                    end_time,
                    poster_image: f.poster_images.clone(),
                    price_per_ticket: f.price_per_ticket,
                    max_tickets_per_user: f.max_tickets_per_user,
                    total_ticket: f.total_ticket,
                    date: f.dates.clone(),
                    category: f.category.trim().to_string(),
                    status: *status,
                };
                (self.update.trigger((event_id.clone(), update)).await, UPDATED)
            }
        };

        match result {
            Ok(envelope) => {
                self.ctx
                    .notifier
                    .success(envelope.message.as_deref().unwrap_or(default_message));
                Ok(envelope.event)
            }
            Err(e) => {
                self.ctx.notifier.error(e.message());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap()
    }

    fn valid() -> EventFields {
        EventFields {
            title: "Jazz Night".into(),
            description: "Live quartet by the backwaters".into(),
            category: "music".into(),
            longitude: 76.26,
            latitude: 9.93,
            start_time: Some(at(18)),
            end_time: Some(at(22)),
            dates: vec![at(0)],
            price_per_ticket: 499.0,
            max_tickets_per_user: 4,
            total_ticket: 200,
            poster_images: vec!["https://img.test/p.jpg".into()],
        }
    }

    #[test]
    fn test_valid_event_has_no_errors() {
        assert!(validate_event(&valid()).is_empty());
    }

    #[test]
    fn test_end_before_start() {
        let mut fields = valid();
        fields.end_time = Some(at(17));
        assert_eq!(
            validate_event(&fields).get("endTime").map(String::as_str),
            Some("End time must be after the start time")
        );
    }

    #[test]
    fn test_ticket_limits() {
        let mut fields = valid();
        fields.max_tickets_per_user = 300;
        assert!(validate_event(&fields).contains_key("maxTicketsPerUser"));

        fields.total_ticket = 0;
        fields.max_tickets_per_user = 0;
        let errors = validate_event(&fields);
        assert!(errors.contains_key("totalTicket"));
        assert!(errors.contains_key("maxTicketsPerUser"));
    }

    #[test]
    fn test_free_event_is_allowed_but_negative_price_is_not() {
        let mut fields = valid();
        fields.price_per_ticket = 0.0;
        assert!(validate_event(&fields).is_empty());

        fields.price_per_ticket = -1.0;
        assert!(validate_event(&fields).contains_key("pricePerTicket"));
    }

    #[test]
    fn test_blank_form_reports_each_field_once() {
        let errors = validate_event(&EventFields::default());
        for field in ["title", "description", "category", "startTime", "endTime", "date", "posterImage"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
        assert_eq!(errors["title"], "Title is required");
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let mut fields = valid();
        fields.latitude = 91.0;
        fields.longitude = -200.0;
        let errors = validate_event(&fields);
        assert!(errors.contains_key("latitude"));
        assert!(errors.contains_key("longitude"));
    }

    #[test]
    fn test_nan_coordinates_are_rejected() {
        let mut fields = valid();
        fields.latitude = f64::NAN;
        fields.longitude = f64::NAN;
        let errors = validate_event(&fields);
        assert_eq!(errors["latitude"], "Must be between -90 and 90");
        assert!(errors.contains_key("longitude"));
    }
}
