// UI layer: the text menu loop.
// Answers come through a `Prompt`: dialoguer when stdin and stdout are a
// terminal, plain lines from stdin otherwise. Messages go to any `Write`,
// so the loop can be driven from a script in tests.

use crate::booking::TicketOffice;
use crate::error::{BookingError, InputClosed};
use crate::menu::{MainChoice, Screen, SessionChoice};
use anyhow::Result;
use console::Term;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, info};

/// Source of the operator's answers.
pub trait Prompt {
    /// Ask one question. `None` means the input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Prompts on the stdout terminal using `dialoguer::Input`.
pub struct TermPrompt {
    term: Term,
}

impl TermPrompt {
    pub fn new() -> Self {
        TermPrompt {
            term: Term::stdout(),
        }
    }
}

impl Default for TermPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TermPrompt {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        // Empty answers are passed through as is.
        let answer = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term);
        match answer {
            Ok(answer) => Ok(Some(answer)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Reads one answer per line, for piped or redirected input.
/// The prompt text is echoed to `echo` without a trailing newline.
pub struct LinePrompt<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        LinePrompt { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_string()))
    }
}

/// Run the menu on the process's stdin/stdout until the user picks "0"
/// or the input ends.
pub fn main_menu(office: TicketOffice) -> Result<()> {
    if io::stdin().is_terminal() && Term::stdout().is_term() {
        Menu::new(office, TermPrompt::new(), io::stdout()).run()
    } else {
        debug!("input is not a terminal, reading plain lines");
        let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());
        Menu::new(office, prompt, io::stdout()).run()
    }
}

/// The control loop: shows a screen, reads a choice, runs the operation.
pub struct Menu<P, W> {
    office: TicketOffice,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> Menu<P, W> {
    pub fn new(office: TicketOffice, prompt: P, out: W) -> Self {
        Menu {
            office,
            prompt,
            out,
        }
    }

    /// Loop until "0" is chosen or the input runs out.
    ///
    /// Rejected operations are printed and the menu is shown again. Store
    /// failures (unreadable or corrupt files) end the loop with an error.
    pub fn run(mut self) -> Result<()> {
        match self.drive() {
            Err(err) if err.is::<InputClosed>() => {
                info!("input closed, leaving the menu");
                Ok(())
            }
            other => other,
        }
    }

    fn drive(&mut self) -> Result<()> {
        let mut screen = Screen::MainMenu;
        loop {
            screen = match screen {
                Screen::MainMenu => self.main_screen()?,
                Screen::LoggedIn(username) => self.session_screen(username)?,
                Screen::Exited => return Ok(()),
            };
        }
    }

    fn main_screen(&mut self) -> Result<Screen> {
        writeln!(self.out, "\nMovie Ticketing System")?;
        for line in MainChoice::MENU {
            writeln!(self.out, "{line}")?;
        }
        let choice = MainChoice::parse(&self.read("Enter your choice")?);
        debug!(?choice, "main menu");
        let login = match choice {
            MainChoice::SignUp => {
                self.sign_up()?;
                None
            }
            MainChoice::LogIn => self.login()?,
            MainChoice::ListMovies => {
                self.show_available_movies()?;
                None
            }
            MainChoice::AddMovie => {
                self.add_movie()?;
                None
            }
            MainChoice::Exit => {
                writeln!(self.out, "Thank you for using the Movie Ticketing System.")?;
                None
            }
            MainChoice::Invalid => {
                writeln!(self.out, "Invalid choice, please try again.")?;
                None
            }
        };
        Ok(Screen::after_main(choice, login))
    }

    fn session_screen(&mut self, username: String) -> Result<Screen> {
        writeln!(self.out)?;
        for line in SessionChoice::MENU {
            writeln!(self.out, "{line}")?;
        }
        let choice = SessionChoice::parse(&self.read("Enter your choice")?);
        debug!(?choice, username = %username, "session menu");
        if choice == SessionChoice::Book {
            self.book(&username)?;
        }
        Ok(Screen::after_session(choice, username))
    }

    fn sign_up(&mut self) -> Result<()> {
        let username = self.read("Enter your username to sign up")?;
        let outcome = self.office.register(&username);
        if self.report(outcome)?.is_some() {
            writeln!(self.out, "User registered successfully.")?;
        }
        Ok(())
    }

    /// Returns the session username on a successful login.
    fn login(&mut self) -> Result<Option<String>> {
        let username = self.read("Enter your username to log in")?;
        let outcome = self.office.login(&username);
        let session = self.report(outcome)?;
        if session.is_some() {
            writeln!(self.out, "Login successful.")?;
        }
        Ok(session)
    }

    fn book(&mut self, username: &str) -> Result<()> {
        let movie_id = self.read("Enter the movie ID you want to book a ticket for")?;
        let seat = self.read("Enter the seat number you want to book")?;
        let outcome = self.office.book(username, &movie_id, &seat);
        if let Some(booking) = self.report(outcome)? {
            writeln!(self.out, "Ticket booked successfully for seat {}.", booking.seat)?;
        }
        Ok(())
    }

    fn show_available_movies(&mut self) -> Result<()> {
        for row in self.office.available_movies()? {
            writeln!(self.out, "{row}")?;
        }
        Ok(())
    }

    fn add_movie(&mut self) -> Result<()> {
        let movie_id = self.read("Enter a new movie ID")?;
        let seats = self.read("Enter total seats separated by a comma (e.g., A1,A2,A3)")?;
        let outcome = self.office.add_movie(&movie_id, &seats);
        if self.report(outcome)?.is_some() {
            writeln!(self.out, "Movie added successfully.")?;
        }
        Ok(())
    }

    /// Print a rejection and swallow it; let storage errors through.
    fn report<T>(&mut self, outcome: Result<T, BookingError>) -> Result<Option<T>> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_rejection() => {
                writeln!(self.out, "{err}")?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn read(&mut self, prompt: &str) -> Result<String> {
        self.prompt
            .ask(prompt)?
            .ok_or_else(|| anyhow::Error::new(InputClosed))
    }
}
