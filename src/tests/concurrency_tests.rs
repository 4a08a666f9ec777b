#[cfg(test)]
mod tests {
    use crate::tests::support::test_state;
    use std::thread;

    #[test]
    fn concurrent_likes_are_never_lost() {
        let state = test_state();
        let team = state.teams.create_team("Likers", "owner").unwrap();
        let column = state.columns.get_columns(&team.id).unwrap()[0].id;
        let thought = state
            .thoughts
            .create_thought(&team.id, "pizza friday", column)
            .unwrap();

        const WORKERS: usize = 8;
        const LIKES_PER_WORKER: usize = 25;

        let handles: Vec<_> = (0..WORKERS)
            .map(|_| {
                let thoughts = state.thoughts.clone();
                let team_id = team.id;
                let thought_id = thought.id;
                thread::spawn(move || {
                    for _ in 0..LIKES_PER_WORKER {
                        thoughts.like_thought(&team_id, thought_id).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let liked = state.thoughts.fetch_thought(&team.id, thought.id).unwrap();
        assert_eq!(liked.heart_count, (WORKERS * LIKES_PER_WORKER) as i64);
    }
}
