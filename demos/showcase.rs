//! Walks through the collections: a student roster sorted and searched with the cursor
//! algorithms, then a score map built with `get_or_default`.
//!
//! Run with `RUST_LOG=avl_collections=trace cargo run --example showcase` to see the
//! rotations and reallocations as they happen.

use std::cmp::Ordering;
use std::fmt;

use avl_collections::{AvlMap, Sequence, algorithm};
use tracing_subscriber::prelude::*;

#[derive(Clone, Debug)]
struct Student {
    id: u32,
    name: String,
    gpa: f64,
}

// Students sort by GPA but are the same student when their ids match.
impl PartialEq for Student {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl PartialOrd for Student {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.gpa.partial_cmp(&other.gpa)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ID: {} | {} (GPA: {})", self.id, self.name, self.gpa)
    }
}

fn student(id: u32, name: &str, gpa: f64) -> Student {
    Student {
        id,
        name: name.to_owned(),
        gpa,
    }
}

fn print_roster(title: &str, roster: &Sequence<Student>) {
    println!("[{title}]");
    let mut cursor = roster.begin();
    while cursor != roster.end() {
        println!("{}", roster[cursor]);
        cursor += 1;
    }
}

fn demo_sequence_and_algorithms() {
    println!("\n=== 1. Sequence & Generic Algorithms ===");

    let mut students = Sequence::new();
    students.push(student(101, "Alice", 3.8));
    students.push(student(102, "Bob", 2.5));
    students.push(student(103, "Charlie", 3.9));
    students.push(student(104, "Dave", 3.2));
    tracing::debug!(len = students.len(), capacity = students.capacity(), "built roster");

    print_roster("Original", &students);

    let (first, last) = (students.begin(), students.end());
    algorithm::quicksort(&mut students, first, last);
    println!();
    print_roster("Sorted", &students);

    println!("\n[Search]");
    let target = student(102, "", 0.0);
    let found = algorithm::linear_search(&students, students.begin(), students.end(), &target);
    if found == students.end() {
        println!("Not found.");
    } else {
        println!("Found: {}", students[found]);
    }

    match students.at(students.len()) {
        Ok(extra) => println!("Unexpected student: {extra}"),
        Err(error) => tracing::info!(%error, "bounds-checked access rejected"),
    }
}

fn demo_map() {
    println!("\n=== 2. Map (AVL Tree) ===");

    let mut scores: AvlMap<String, i32> = AvlMap::new();
    *scores.get_or_default("Math".to_owned()) = 90;
    *scores.get_or_default("Science".to_owned()) = 85;
    *scores.get_or_default("History".to_owned()) = 88;

    *scores.get_or_default("Science".to_owned()) = 95;

    println!("\n[Scores]");
    scores.for_each_in_order(|subject, score| println!("{subject} : {score}"));

    println!("\nArt Score (Default): {}", scores.get_or_default("Art".to_owned()));
    tracing::debug!(entries = scores.len(), height = scores.as_tree().height(), "score map");
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== avl_collections Demo ===");

    demo_sequence_and_algorithms();
    demo_map();
}
