use crate::replay::command::{Command, command_channel, parse_command, spawn_listener};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::thread;
use std::time::{Duration, Instant};

fn poll_until(
    rx: &crate::replay::command::CommandReceiver,
    want: usize,
    timeout: Duration,
) -> Vec<Command> {
    let deadline = Instant::now() + timeout;
    let mut seen = Vec::new();
    while seen.len() < want && Instant::now() < deadline {
        match rx.poll() {
            Some(cmd) => seen.push(cmd),
            None => thread::sleep(Duration::from_millis(1)),
        }
    }
    seen
}

#[test]
fn parses_toggle_and_rates() {
    assert_eq!(parse_command("t"), Some(Command::ToggleDisplay));
    assert_eq!(parse_command("  t \n"), Some(Command::ToggleDisplay));
    assert_eq!(parse_command("250"), Some(Command::SetRate(250.0)));
    assert_eq!(parse_command("0.5"), Some(Command::SetRate(0.5)));
    assert_eq!(parse_command("-4"), Some(Command::SetRate(-4.0)));
}

#[test]
fn garbage_is_ignored() {
    for input in ["", "T", "toggle", "fast", "1,5", "NaN"] {
        assert_eq!(parse_command(input), None, "input {input:?}");
    }
}

#[test]
fn poll_without_pending_command_returns_immediately() {
    let (_tx, rx) = command_channel();
    let before = Instant::now();
    assert_eq!(rx.poll(), None);
    assert!(before.elapsed() < Duration::from_millis(50));
}

#[test]
fn send_blocks_until_polled() {
    let (tx, rx) = command_channel();
    let sender = thread::spawn(move || {
        tx.send(Command::SetRate(42.0)).unwrap();
        Instant::now()
    });

    thread::sleep(Duration::from_millis(50));
    let polled_at = Instant::now();
    assert_eq!(
        poll_until(&rx, 1, Duration::from_secs(5)),
        vec![Command::SetRate(42.0)]
    );

    let sent_at = sender.join().unwrap();
    assert!(sent_at >= polled_at);
}

#[test]
fn rate_update_wins_over_toggle_then_toggle_follows() {
    let (tx, rx) = command_channel();
    let toggle_tx = tx.clone();
    let t1 = thread::spawn(move || toggle_tx.send(Command::ToggleDisplay).unwrap());
    let t2 = thread::spawn(move || tx.send(Command::SetRate(7.0)).unwrap());

    // Let both senders park on their rendezvous.
    thread::sleep(Duration::from_millis(100));

    assert_eq!(rx.poll(), Some(Command::SetRate(7.0)));
    assert_eq!(rx.poll(), Some(Command::ToggleDisplay));
    assert_eq!(rx.poll(), None);

    t1.join().unwrap();
    t2.join().unwrap();
}

#[test]
fn send_fails_once_receiver_is_gone() {
    let (tx, rx) = command_channel();
    drop(rx);
    assert!(tx.send(Command::ToggleDisplay).is_err());
    assert!(tx.send(Command::SetRate(1.0)).is_err());
}

#[test]
fn listener_forwards_commands_in_order_and_skips_garbage() {
    let (tx, rx) = command_channel();
    let input = Cursor::new("t\n2.5\nbogus\n\n-3\n");
    let handle = spawn_listener(input, tx);

    let seen = poll_until(&rx, 3, Duration::from_secs(5));
    assert_eq!(
        seen,
        vec![
            Command::ToggleDisplay,
            Command::SetRate(2.5),
            Command::SetRate(-3.0),
        ]
    );

    handle.join().unwrap();
}

#[test]
fn listener_skips_non_utf8_lines_and_keeps_reading() {
    let (tx, rx) = command_channel();
    let handle = spawn_listener(Cursor::new(b"\xff\xfe\nt\n42\n".to_vec()), tx);

    let seen = poll_until(&rx, 2, Duration::from_secs(5));
    assert_eq!(seen, vec![Command::ToggleDisplay, Command::SetRate(42.0)]);

    handle.join().unwrap();
}

#[test]
fn listener_stops_when_replay_side_is_gone() {
    let (tx, rx) = command_channel();
    drop(rx);
    let handle = spawn_listener(Cursor::new("1\n2\n3\n"), tx);
    handle.join().unwrap();
}
