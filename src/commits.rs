use crate::model::{Commit, LineRecord};
use std::collections::HashMap;

/// Group line records into commits. The output preserves first-seen order of
/// distinct commit ids, and each commit's metadata is copied from the first
/// record encountered for that id; later records only extend the line view.
pub fn aggregate(records: &[LineRecord]) -> Vec<Commit> {
    let mut commits: Vec<Commit> = Vec::new();
    let mut index_of: HashMap<&str, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let index = match index_of.get(record.commit.as_str()) {
            Some(&i) => i,
            None => {
                let commit = Commit::from_first(record.commit.clone(), record);
                commits.push(commit);
                let i = commits.len() - 1;
                index_of.insert(record.commit.as_str(), i);
                i
            }
        };
        commits[index].push_row(row);
    }

    commits
}
