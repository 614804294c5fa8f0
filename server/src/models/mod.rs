pub mod premiere;
pub mod reservation;
pub mod snapshot;

pub use premiere::PremiereDetails;
pub use reservation::{Reservation, ReservationPayload, TicketCount, ValidationError};
pub use snapshot::FundraisingSnapshot;
