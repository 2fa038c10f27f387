use crate::state::AppState;
use crate::view;
use amigo_api::types::{CreateTripRequest, Credentials, Flight, Hotel, JoinTripRequest};
use amigo_booking::{AutoDismiss, BookingFlow, BookingKind, BookingSelection, CardDetails};
use amigo_chat::{render_message, ChatSync, Message, SyncOptions};
use amigo_core::{validate, Session};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;

const HELP: &str = "\
Commands:
  /signup <username> <password>   create an account
  /login <username> <password>    sign in
  /logout                         sign out
  /trips                          list your trips
  /create <name>                  create a trip
  /join <code>                    join a trip by invite code
  /open <trip_id>                 open a trip's chat
  /close                          close the open chat
  /flights                        list flight options for the open trip
  /hotels                         list hotel options for the open trip
  /itinerary                      show the open trip's day-by-day plan
  /book flight|hotel <n>          start a booking for option n
  /pay <card> <expiry> <cvv> <name>  pay for the started booking
  /quit                           exit
Anything else is sent as a chat message to the open trip.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Signup { username: String, password: String },
    Login { username: String, password: String },
    Logout,
    Trips,
    Create { name: String },
    Join { code: String },
    Open { trip_id: String },
    Close,
    Flights,
    Hotels,
    Itinerary,
    Book { kind: BookingKind, index: usize },
    Pay { card: String, expiry: String, cvv: String, name: String },
    Help,
    Quit,
    Say { text: String },
}

/// Parse one input line. Lines that do not start with a slash are chat text.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if !line.starts_with('/') {
        return Ok(Command::Say {
            text: line.to_string(),
        });
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match command {
        "/signup" | "/login" => {
            if args.len() != 2 {
                return Err(format!("Usage: {} <username> <password>", command));
            }
            let (username, password) = (args[0].to_string(), args[1].to_string());
            Ok(if command == "/signup" {
                Command::Signup { username, password }
            } else {
                Command::Login { username, password }
            })
        }
        "/logout" => Ok(Command::Logout),
        "/trips" => Ok(Command::Trips),
        "/create" => {
            if args.is_empty() {
                return Err("Usage: /create <name>".to_string());
            }
            Ok(Command::Create {
                name: args.join(" "),
            })
        }
        "/join" => match args.as_slice() {
            [code] => Ok(Command::Join {
                code: code.to_string(),
            }),
            _ => Err("Usage: /join <code>".to_string()),
        },
        "/open" => match args.as_slice() {
            [trip_id] => Ok(Command::Open {
                trip_id: trip_id.to_string(),
            }),
            _ => Err("Usage: /open <trip_id>".to_string()),
        },
        "/close" => Ok(Command::Close),
        "/flights" => Ok(Command::Flights),
        "/hotels" => Ok(Command::Hotels),
        "/itinerary" => Ok(Command::Itinerary),
        "/book" => {
            let usage = "Usage: /book flight|hotel <n>".to_string();
            if args.len() != 2 {
                return Err(usage);
            }
            let kind = match args[0] {
                "flight" => BookingKind::Flight,
                "hotel" => BookingKind::Hotel,
                _ => return Err(usage),
            };
            let index: usize = args[1].parse().map_err(|_| usage)?;
            if index == 0 {
                return Err("Option numbers start at 1".to_string());
            }
            Ok(Command::Book { kind, index })
        }
        "/pay" => {
            if args.len() < 4 {
                return Err("Usage: /pay <card> <expiry> <cvv> <name>".to_string());
            }
            Ok(Command::Pay {
                card: args[0].to_string(),
                expiry: args[1].to_string(),
                cvv: args[2].to_string(),
                name: args[3..].join(" "),
            })
        }
        "/help" => Ok(Command::Help),
        "/quit" | "/exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command {} (try /help)", other)),
    }
}

#[derive(Debug, Default)]
pub struct Output {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Output {
    fn none() -> Self {
        Self::default()
    }

    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

struct ActiveChat {
    sync: ChatSync,
    session: Session,
    revision: tokio::sync::watch::Receiver<u64>,
    /// The snapshot as of the last render, so updates can be diffed against
    /// what is already on screen.
    last: Vec<Message>,
    /// Carousels fetched for this trip, so `/book <kind> <n>` can index them.
    flights: Vec<Flight>,
    hotels: Vec<Hotel>,
}

/// The interactive session: one open chat at most, one booking flow at most.
pub struct Repl {
    state: AppState,
    active: Option<ActiveChat>,
    flow: Option<BookingFlow>,
    confirmation: Option<AutoDismiss>,
}

impl Repl {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            active: None,
            flow: None,
            confirmation: None,
        }
    }

    pub async fn handle_line(&mut self, line: &str) -> Output {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Output::none();
        }
        match parse(trimmed) {
            Ok(command) => self.execute(command).await,
            Err(usage) => Output::line(usage),
        }
    }

    async fn session(&self) -> Result<Session, Output> {
        match self.state.sessions.load().await {
            Ok(Some(session)) => Ok(session),
            _ => Err(Output::line("Sign in first (/login <username> <password>)")),
        }
    }

    async fn execute(&mut self, command: Command) -> Output {
        match command {
            Command::Signup { username, password } => self.signup(&username, &password).await,
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => self.logout().await,
            Command::Trips => self.list_trips().await,
            Command::Create { name } => self.create_trip(&name).await,
            Command::Join { code } => self.join_trip(&code).await,
            Command::Open { trip_id } => self.open_chat(&trip_id).await,
            Command::Close => self.close_chat(),
            Command::Flights => self.list_flights().await,
            Command::Hotels => self.list_hotels().await,
            Command::Itinerary => self.show_itinerary().await,
            Command::Book { kind, index } => self.start_booking(kind, index).await,
            Command::Pay {
                card,
                expiry,
                cvv,
                name,
            } => self.pay(&card, &expiry, &cvv, &name).await,
            Command::Help => Output::line(HELP),
            Command::Quit => Output {
                lines: vec!["Bye.".to_string()],
                quit: true,
            },
            Command::Say { text } => self.say(&text).await,
        }
    }

    async fn signup(&mut self, username: &str, password: &str) -> Output {
        if let Err(err) = validate::validate_credentials(username, password) {
            return Output::line(err.to_string());
        }
        match self
            .state
            .api
            .signup(&Credentials::new(username, password))
            .await
        {
            Ok(_) => Output::line("Account created. Sign in with /login."),
            Err(err) => Output::line(format!("Signup failed: {}", err)),
        }
    }

    async fn login(&mut self, username: &str, password: &str) -> Output {
        if let Err(err) = validate::validate_credentials(username, password) {
            return Output::line(err.to_string());
        }
        match self
            .state
            .api
            .login(&Credentials::new(username, password))
            .await
        {
            Ok(response) => {
                let session = response.into_session(username);
                if let Err(err) = self.state.sessions.save(&session).await {
                    return Output::line(format!("Login failed: {}", err));
                }
                Output::line(format!("Signed in as {}", session.username))
            }
            Err(err) => Output::line(format!("Login failed: {}", err)),
        }
    }

    async fn logout(&mut self) -> Output {
        self.close_chat();
        match self.state.sessions.clear().await {
            Ok(()) => Output::line("Signed out."),
            Err(err) => Output::line(format!("Logout failed: {}", err)),
        }
    }

    async fn list_trips(&mut self) -> Output {
        let session = match self.session().await {
            Ok(session) => session,
            Err(output) => return output,
        };
        match self.state.api.trips_by_user(&session.username).await {
            Ok(trips) if trips.is_empty() => Output::line("No trips yet (/create <name>)."),
            Ok(trips) => Output::lines(
                trips
                    .iter()
                    .map(|t| {
                        format!(
                            "{}  {}  [{:?}] ({} member{})",
                            t.trip_id,
                            t.trip_name,
                            t.status,
                            t.members.len(),
                            if t.members.len() == 1 { "" } else { "s" }
                        )
                    })
                    .collect(),
            ),
            Err(err) => Output::line(format!("Could not load trips: {}", err)),
        }
    }

    async fn create_trip(&mut self, name: &str) -> Output {
        let session = match self.session().await {
            Ok(session) => session,
            Err(output) => return output,
        };
        let trip_name = match validate::validate_trip_name(name) {
            Ok(trip_name) => trip_name,
            Err(err) => return Output::line(err.to_string()),
        };
        let request = CreateTripRequest::new(trip_name, session.user_id);
        match self.state.api.create_trip(&request).await {
            Ok(created) => {
                let mut lines = vec![format!(
                    "Trip created: {} ({})",
                    created.trip_name.as_deref().unwrap_or(&request.trip_name),
                    created.trip_id.as_deref().unwrap_or("id pending")
                )];
                if let Some(code) = created.invite_code {
                    lines.push(format!("Invite code: {}", code));
                }
                Output::lines(lines)
            }
            Err(err) => Output::line(format!("Could not create trip: {}", err)),
        }
    }

    async fn join_trip(&mut self, code: &str) -> Output {
        let session = match self.session().await {
            Ok(session) => session,
            Err(output) => return output,
        };
        // A short code is reported exactly like a rejected one, without any
        // network call.
        let Ok(code) = validate::validate_invite_code(code) else {
            return Output::line("Invalid code");
        };
        let request = JoinTripRequest {
            user_id: session.user_id,
        };
        match self.state.api.join_trip(&code, &request).await {
            Ok(_) => Output::line("Joined! See it with /trips."),
            // The backend does not distinguish a bad code from anything else.
            Err(err) => {
                tracing::warn!("Join by code failed: {}", err);
                Output::line("Invalid code")
            }
        }
    }

    async fn open_chat(&mut self, trip_id: &str) -> Output {
        let session = match self.session().await {
            Ok(session) => session,
            Err(output) => return output,
        };
        self.close_chat();
        let sync = ChatSync::start(
            self.state.api.clone(),
            trip_id,
            session.clone(),
            SyncOptions::from_config(&self.state.config),
        );
        let revision = sync.subscribe();
        self.active = Some(ActiveChat {
            sync,
            session,
            revision,
            last: Vec::new(),
            flights: Vec::new(),
            hotels: Vec::new(),
        });
        Output::line(format!("Opened trip {} (/close to leave)", trip_id))
    }

    fn close_chat(&mut self) -> Output {
        self.flow = None;
        self.confirmation = None;
        match self.active.take() {
            Some(active) => {
                active.sync.stop();
                Output::line("Chat closed.")
            }
            None => Output::none(),
        }
    }

    async fn list_flights(&mut self) -> Output {
        let Some(active) = &mut self.active else {
            return Output::line("Open a trip first (/open <trip_id>)");
        };
        match self.state.api.trip_flights(active.sync.trip_id()).await {
            Ok(flights) if flights.is_empty() => Output::line("No flight options yet."),
            Ok(flights) => {
                let lines = flights
                    .iter()
                    .enumerate()
                    .map(|(i, f)| {
                        format!(
                            "{}. {} {} {} → {} ({}), {}/person",
                            i + 1,
                            f.airline,
                            f.flight_code,
                            f.origin_city,
                            f.dest_city,
                            f.duration,
                            f.price_current
                        )
                    })
                    .collect();
                active.flights = flights;
                Output::lines(lines)
            }
            Err(err) => Output::line(format!("Could not load flights: {}", err)),
        }
    }

    async fn list_hotels(&mut self) -> Output {
        let Some(active) = &mut self.active else {
            return Output::line("Open a trip first (/open <trip_id>)");
        };
        match self.state.api.trip_hotels(active.sync.trip_id()).await {
            Ok(hotels) if hotels.is_empty() => Output::line("No hotel options yet."),
            Ok(hotels) => {
                let lines = hotels
                    .iter()
                    .enumerate()
                    .map(|(i, h)| {
                        format!(
                            "{}. {} — {} ({}★), {}/night",
                            i + 1,
                            h.name,
                            h.location,
                            h.rating,
                            h.price_per_night
                        )
                    })
                    .collect();
                active.hotels = hotels;
                Output::lines(lines)
            }
            Err(err) => Output::line(format!("Could not load hotels: {}", err)),
        }
    }

    async fn show_itinerary(&mut self) -> Output {
        let Some(active) = &self.active else {
            return Output::line("Open a trip first (/open <trip_id>)");
        };
        match self.state.api.trip_itinerary(active.sync.trip_id()).await {
            Ok(days) if days.is_empty() => Output::line("No itinerary yet."),
            Ok(days) => {
                let mut lines = Vec::new();
                for day in &days {
                    lines.push(format!("Day {} — {} ({})", day.day, day.title, day.date));
                    for stop in &day.stops {
                        lines.push(format!("  {} {}", stop.time, stop.title));
                    }
                }
                Output::lines(lines)
            }
            Err(err) => Output::line(format!("Could not load itinerary: {}", err)),
        }
    }

    async fn travellers(&self, trip_id: &str) -> u32 {
        match self.state.api.trip_members(trip_id).await {
            Ok(members) if !members.is_empty() => members.len() as u32,
            Ok(_) => 1,
            Err(err) => {
                tracing::warn!("Could not load members, assuming one traveller: {}", err);
                1
            }
        }
    }

    async fn start_booking(&mut self, kind: BookingKind, index: usize) -> Output {
        let trip_id = match &self.active {
            Some(active) => active.sync.trip_id().to_string(),
            None => return Output::line("Open a trip first (/open <trip_id>)"),
        };
        let travellers = self.travellers(&trip_id).await;

        let Some(active) = &self.active else {
            return Output::line("Open a trip first (/open <trip_id>)");
        };
        let selection = match kind {
            BookingKind::Flight => match active.flights.get(index - 1) {
                Some(flight) => BookingSelection::from_flight(flight, travellers),
                None => return Output::line("No such flight option (list with /flights)."),
            },
            BookingKind::Hotel => match active.hotels.get(index - 1) {
                Some(hotel) => BookingSelection::from_hotel(hotel, travellers),
                None => return Output::line("No such hotel option (list with /hotels)."),
            },
        };

        let mut flow = BookingFlow::new(selection);
        let quote = match flow.proceed_to_payment() {
            Ok(quote) => quote.clone(),
            Err(err) => return Output::line(err.to_string()),
        };

        // The transcript stays frozen while the booking owns the screen.
        active.sync.pause();

        let mut lines = vec![
            format!(
                "Booking {} — {}",
                flow.selection().name(),
                flow.selection().price_display()
            ),
            format!(
                "Total: {}{}",
                amigo_booking::pricing::format_price(quote.total),
                match quote.rooms {
                    Some(rooms) => format!(" for {} room{}", rooms, if rooms == 1 { "" } else { "s" }),
                    None => format!(" for {} passenger{}", travellers, if travellers == 1 { "" } else { "s" }),
                }
            ),
            "Pay with /pay <card> <expiry> <cvv> <name>".to_string(),
        ];
        if self.flow.replace(flow).is_some() {
            lines.push("(previous booking discarded)".to_string());
        }
        Output::lines(lines)
    }

    async fn pay(&mut self, card: &str, expiry: &str, cvv: &str, name: &str) -> Output {
        let Some(flow) = &mut self.flow else {
            return Output::line("Start a booking first (/book flight|hotel <n>)");
        };
        let card = CardDetails::new(card, expiry, cvv, name);
        let receipt = match flow.pay(self.state.payments.as_ref(), &card).await {
            Ok(receipt) => receipt.clone(),
            Err(err) => return Output::line(format!("Payment failed: {}", err)),
        };

        let kind = flow.selection().kind();
        self.flow = None;
        if let Some(active) = &self.active {
            active.sync.resume();
        }
        self.confirmation = Some(AutoDismiss::start(Duration::from_millis(
            self.state.config.booking.confirmation_auto_close_ms,
        )));

        Output::lines(vec![
            format!("{} booking confirmed!", kind.label()),
            format!("Booking reference: {}", receipt.reference),
        ])
    }

    async fn say(&mut self, text: &str) -> Output {
        let Some(active) = &self.active else {
            return Output::line("Open a trip first (/open <trip_id>)");
        };
        active.sync.send(text).await;
        Output::none()
    }

    /// Render what changed since the last call. Called from the run loop
    /// whenever the sync's revision counter moves. New messages at the tail
    /// render incrementally; any in-place change to an already-shown entry
    /// (an echo claiming a pending send, a message enriched with a consensus
    /// payload on refetch) repaints the whole transcript instead of going
    /// unseen.
    pub async fn render_updates(&mut self) -> Vec<String> {
        let Some(active) = &mut self.active else {
            return Vec::new();
        };
        let messages = active.sync.snapshot().await;
        if messages == active.last {
            return Vec::new();
        }
        let grew_in_place = messages.len() >= active.last.len()
            && messages[..active.last.len()] == active.last[..];
        let start = if grew_in_place { active.last.len() } else { 0 };
        let lines = messages[start..]
            .iter()
            .map(|m| view::format_block(&render_message(m, &active.session.username)))
            .collect();
        active.last = messages;
        lines
    }
}

async fn transcript_changed(active: &mut Option<ActiveChat>) {
    match active {
        Some(chat) => {
            if chat.revision.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

async fn confirmation_elapsed(confirmation: &mut Option<AutoDismiss>) {
    match confirmation {
        Some(timer) => timer.wait().await,
        None => std::future::pending::<()>().await,
    }
}

enum Event {
    Line(Option<String>),
    Transcript,
    ConfirmationClosed,
}

/// The interactive loop: stdin commands, transcript updates and the
/// confirmation timer, multiplexed on one task.
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let mut repl = Repl::new(state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("amiGO — type /help for commands.");

    loop {
        let event = select! {
            line = lines.next_line() => Event::Line(line?),
            _ = transcript_changed(&mut repl.active) => Event::Transcript,
            _ = confirmation_elapsed(&mut repl.confirmation) => Event::ConfirmationClosed,
        };

        match event {
            Event::Line(None) => break,
            Event::Line(Some(line)) => {
                let output = repl.handle_line(&line).await;
                for line in &output.lines {
                    println!("{}", line);
                }
                if output.quit {
                    break;
                }
            }
            Event::Transcript => {
                for line in repl.render_updates().await {
                    println!("{}", line);
                }
            }
            Event::ConfirmationClosed => {
                repl.confirmation = None;
                println!("(confirmation closed)");
            }
        }
    }
    Ok(())
}
