//! Round-trip and ordering properties of the command engine, checked through
//! the public API.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use taskbook::commands::{
    AddCommand, ClearCommand, Command, CommandError, CommandExecutor, DeleteCommand, EditCommand,
    FilterCommand, MarkCommand, PurgeCommand,
};
use taskbook::model::{Model, Tag, Task, TaskFilter};

fn tag(name: &str) -> Tag {
    Tag::new(name).unwrap()
}

fn x_filter() -> Vec<TaskFilter> {
    vec![TaskFilter::Tag(tag("x"))]
}

/// `n` tasks named T0..Tn; bit i of `mask` gives task i the `x` tag
fn tagged_model(n: usize, mask: u32) -> Model {
    Model::with_tasks((0..n).map(|i| {
        let task = Task::new(&format!("T{}", i)).unwrap();
        if mask & (1 << i) != 0 {
            task.with_tags([tag("x")])
        } else {
            task
        }
    }))
}

fn handles(model: &Model) -> Vec<Rc<Task>> {
    model.tasks().cloned().collect()
}

fn titles(model: &Model) -> Vec<String> {
    model.tasks().map(|t| t.title().to_string()).collect()
}

fn assert_same_entities(model: &Model, expected: &[Rc<Task>]) {
    let actual = handles(model);
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(Rc::ptr_eq(a, e), "entity at store index {} differs", i);
    }
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

#[test]
fn purge_round_trip_for_every_visible_subset() {
    for n in 0..=6 {
        for mask in 0..(1u32 << n) {
            let mut model = tagged_model(n, mask);
            model.set_task_filters(x_filter());
            let before = handles(&model);

            let mut purge = PurgeCommand::new();
            if mask == 0 {
                assert_eq!(purge.execute(&mut model), Err(CommandError::NothingToPurge));
                assert_same_entities(&model, &before);
                continue;
            }
            purge.execute(&mut model).unwrap();
            assert_eq!(model.task_count(), n - mask.count_ones() as usize);
            assert!(model.filtered_task_list().is_empty());

            // Whatever filters are active at undo time must not matter
            model.set_task_filters(vec![TaskFilter::Done]);
            purge.undo(&mut model).unwrap();
            assert_same_entities(&model, &before);
            assert_eq!(model.selected_task_filters(), x_filter().as_slice());
        }
    }
}

#[test]
fn purge_reinserts_at_captured_store_indices() {
    // Store of 5, filter shows indices 1 and 3
    let mut model = tagged_model(5, 0b01010);
    model.set_task_filters(x_filter());
    let mut purge = PurgeCommand::new();
    purge.execute(&mut model).unwrap();
    assert_eq!(purge.captured_indices(), vec![1, 3]);
    assert_eq!(titles(&model), vec!["T0", "T2", "T4"]);

    purge.undo(&mut model).unwrap();
    assert_eq!(titles(&model), vec!["T0", "T1", "T2", "T3", "T4"]);
    assert_eq!(model.task_at(1).unwrap().title(), "T1");
    assert_eq!(model.task_at(3).unwrap().title(), "T3");
}

#[test]
fn purge_scenario_abcd() {
    let mut model = Model::with_tasks([
        Task::new("A").unwrap(),
        Task::new("B").unwrap().with_tags([tag("x")]),
        Task::new("C").unwrap(),
        Task::new("D").unwrap().with_tags([tag("x")]),
    ]);
    model.set_task_filters(x_filter());
    let b = Rc::clone(model.task_at(1).unwrap());
    let d = Rc::clone(model.task_at(3).unwrap());

    let mut purge = PurgeCommand::new();
    purge.execute(&mut model).unwrap();
    assert_eq!(titles(&model), vec!["A", "C"]);
    assert!(model.filtered_task_list().is_empty());

    purge.undo(&mut model).unwrap();
    assert_eq!(titles(&model), vec!["A", "B", "C", "D"]);
    assert!(Rc::ptr_eq(model.task_at(1).unwrap(), &b));
    assert!(Rc::ptr_eq(model.task_at(3).unwrap(), &d));
}

#[test]
fn purge_on_empty_store_is_rejected() {
    let mut model = Model::new();
    let mut purge = PurgeCommand::new();
    assert_eq!(purge.execute(&mut model), Err(CommandError::NothingToPurge));
    assert_eq!(model.task_count(), 0);
    assert!(model.selected_task_filters().is_empty());
}

#[test]
fn purge_keeps_duplicate_valued_tasks_distinct() {
    let mut model = Model::with_tasks([
        Task::new("Same").unwrap(),
        Task::new("Other").unwrap(),
        Task::new("Same").unwrap(),
    ]);
    model.set_task_filters(vec![TaskFilter::Keyword(
        taskbook::model::KeywordFilter::new("same").unwrap(),
    )]);
    let before = handles(&model);

    let mut purge = PurgeCommand::new();
    purge.execute(&mut model).unwrap();
    assert_eq!(purge.captured_indices(), vec![0, 2]);
    assert_eq!(titles(&model), vec!["Other"]);

    purge.undo(&mut model).unwrap();
    assert_same_entities(&model, &before);
}

#[test]
fn second_undo_fails_and_changes_nothing() {
    let mut model = tagged_model(3, 0b101);
    model.set_task_filters(x_filter());
    let mut purge = PurgeCommand::new();
    purge.execute(&mut model).unwrap();
    purge.undo(&mut model).unwrap();
    let after_first_undo = handles(&model);

    assert!(matches!(
        purge.undo(&mut model),
        Err(CommandError::IllegalCommandState(_))
    ));
    assert_same_entities(&model, &after_first_undo);
}

#[test]
fn empty_filter_set_shows_whole_store() {
    for n in 0..=5 {
        let model = tagged_model(n, 0b10101);
        let visible = model.filtered_task_list();
        assert_eq!(visible.len(), model.task_count());
        for (v, s) in visible.iter().zip(model.tasks()) {
            assert!(Rc::ptr_eq(v, s));
        }
    }
}

// ---------------------------------------------------------------------------
// Every command kind round-trips through the executor
// ---------------------------------------------------------------------------

fn mixed_model() -> Model {
    let mut model = Model::with_tasks([
        Task::new("Write report").unwrap().with_tags([tag("work")]),
        Task::new("Buy milk").unwrap().with_done(true),
        Task::new("Review PR").unwrap().with_tags([tag("work")]),
        Task::new("Water plants").unwrap(),
    ]);
    model.set_task_filters(vec![TaskFilter::NotDone]);
    model
}

#[test]
fn every_command_kind_round_trips() {
    let commands = vec![
        Command::Add(AddCommand::new(Task::new("New").unwrap())),
        Command::Delete(DeleteCommand::new(2)),
        Command::Edit(EditCommand::new(1, Task::new("Rewrite report").unwrap())),
        Command::Mark(MarkCommand::new(3, true)),
        Command::Filter(FilterCommand::new(vec![TaskFilter::Tag(tag("work"))])),
        Command::Purge(PurgeCommand::new()),
        Command::Clear(ClearCommand::new()),
    ];

    for command in commands {
        let word = command.word();
        let mut model = mixed_model();
        let before = handles(&model);
        let filters_before = model.selected_task_filters().to_vec();
        let mut executor = CommandExecutor::new();

        executor.execute(command, &mut model).unwrap();
        executor.undo(&mut model).unwrap();
        assert_same_entities(&model, &before);
        assert_eq!(
            model.selected_task_filters(),
            filters_before.as_slice(),
            "filters after undoing {}",
            word
        );

        // Redo then undo again lands in the same place
        executor.redo(&mut model).unwrap();
        executor.undo(&mut model).unwrap();
        assert_same_entities(&model, &before);
    }
}

#[test]
fn delete_addresses_visible_position() {
    let mut model = mixed_model();
    let mut executor = CommandExecutor::new();
    // Visible (not done): Write report, Review PR, Water plants
    executor
        .execute(Command::Delete(DeleteCommand::new(2)), &mut model)
        .unwrap();
    assert_eq!(titles(&model), vec!["Write report", "Buy milk", "Water plants"]);
}

#[test]
fn rejected_commands_never_touch_the_model() {
    let rejected = vec![
        (
            Command::Add(AddCommand::new(Task::new("Buy milk").unwrap().with_done(true))),
            CommandError::DuplicateTask,
        ),
        (
            Command::Edit(EditCommand::new(
                1,
                Task::new("Buy milk").unwrap().with_done(true),
            )),
            CommandError::DuplicateTask,
        ),
        (Command::Delete(DeleteCommand::new(4)), CommandError::InvalidIndex(4)),
        (
            Command::Mark(MarkCommand::new(1, false)),
            CommandError::AlreadyMarked {
                index: 1,
                done: false,
            },
        ),
        (
            Command::Filter(FilterCommand::new(vec![TaskFilter::NotDone])),
            CommandError::NothingChanged("Those filters are already active."),
        ),
    ];

    for (command, expected) in rejected {
        let mut model = mixed_model();
        let before = handles(&model);
        let mut executor = CommandExecutor::new();
        assert_eq!(executor.execute(command, &mut model), Err(expected));
        assert_same_entities(&model, &before);
        assert_eq!(model.selected_task_filters(), &[TaskFilter::NotDone]);
        assert!(executor.is_empty());
    }
}
