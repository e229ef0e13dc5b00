//! Side-effecting half of the client: the gateway client, the intent
//! services, speech capture and the session that drives them.

pub mod contracts;
pub mod executor;
pub mod gateway;
pub mod intent;
pub mod session;
pub mod speech;

pub use contracts::*;
pub use executor::*;
pub use gateway::HttpGateway;
pub use gateway::RemoteGateway;
pub use intent::*;
pub use session::Backend;
pub use session::Session;
pub use speech::*;
