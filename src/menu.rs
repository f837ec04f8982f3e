// Menu state machine. Pure data and transitions, no I/O, so the control
// flow can be checked without a terminal. `ui` drives it.

/// Where the control loop currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    /// A user has logged in; holds the session username.
    LoggedIn(String),
    Exited,
}

/// Options on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    SignUp,
    LogIn,
    ListMovies,
    AddMovie,
    Exit,
    Invalid,
}

impl MainChoice {
    pub const MENU: &'static [&'static str] = &[
        "1. Sign Up",
        "2. Log In",
        "3. View Available Movies",
        "4. Add Movie (Admin)",
        "0. Exit",
    ];

    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => MainChoice::SignUp,
            "2" => MainChoice::LogIn,
            "3" => MainChoice::ListMovies,
            "4" => MainChoice::AddMovie,
            "0" => MainChoice::Exit,
            _ => MainChoice::Invalid,
        }
    }
}

/// Options once logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChoice {
    Book,
    Logout,
    /// Anything else: the session menu is simply shown again.
    Ignored,
}

impl SessionChoice {
    pub const MENU: &'static [&'static str] = &["1. Book a Ticket", "2. Logout"];

    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => SessionChoice::Book,
            "2" => SessionChoice::Logout,
            _ => SessionChoice::Ignored,
        }
    }
}

impl Screen {
    /// Screen after a main-menu choice. `login` is the outcome of the login
    /// prompt and is only looked at for `MainChoice::LogIn`. An empty
    /// username never opens a session, even if it was registered.
    pub fn after_main(choice: MainChoice, login: Option<String>) -> Screen {
        match (choice, login) {
            (MainChoice::Exit, _) => Screen::Exited,
            (MainChoice::LogIn, Some(username)) if !username.is_empty() => {
                Screen::LoggedIn(username)
            }
            _ => Screen::MainMenu,
        }
    }

    /// Screen after a session choice made by `username`.
    pub fn after_session(choice: SessionChoice, username: String) -> Screen {
        match choice {
            SessionChoice::Logout => Screen::MainMenu,
            SessionChoice::Book | SessionChoice::Ignored => Screen::LoggedIn(username),
        }
    }
}
