//! describes affectation of data to clusters

/// label of a point not yet assigned to any cluster
pub const UNASSIGNED: usize = usize::MAX;

/// Read access to the result of a partition: for a point id, the rank of its cluster.
pub trait Affectation<DataId, DataLabel> {
    /// cluster rank of point dataid
    fn get_affectation(&self, dataid: DataId) -> DataLabel;
    /// number of clusters the partition was built with
    fn get_nb_cluster(&self) -> usize;
    /// couples (point id, cluster rank) in point order
    fn iter(&self) -> impl Iterator<Item = (DataId, DataLabel)>;
}

//===============================================================================

/// Affectation of a dataset to clusters. DataId is the rank of the point in the dataset,
/// `labels[i]` gives the cluster of the i-th point, or [UNASSIGNED].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    labels: Vec<usize>,
    nb_cluster: usize,
}

impl Assignment {
    /// all nb_point points unassigned
    pub fn unassigned(nb_point: usize, nb_cluster: usize) -> Self {
        Assignment {
            labels: vec![UNASSIGNED; nb_point],
            nb_cluster,
        }
    }

    /// builds an assignment from labels. Labels must be [UNASSIGNED] or less than nb_cluster
    pub fn new(labels: Vec<usize>, nb_cluster: usize) -> Self {
        assert!(
            labels.iter().all(|l| *l == UNASSIGNED || *l < nb_cluster),
            "label out of range"
        );
        Assignment { labels, nb_cluster }
    }

    pub fn get_labels(&self) -> &[usize] {
        &self.labels
    }

    /// number of points
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// number of points in each cluster
    pub fn get_cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.nb_cluster];
        for l in self.labels.iter().filter(|l| **l != UNASSIGNED) {
            sizes[*l] += 1;
        }
        sizes
    }

    /// number of points whose label differs between self and other (both must have same length)
    pub fn nb_changes(&self, other: &Assignment) -> usize {
        assert_eq!(self.len(), other.len());
        self.labels
            .iter()
            .zip(other.labels.iter())
            .filter(|(a, b)| a != b)
            .count()
    }
} // end of impl Assignment

impl Affectation<usize, usize> for Assignment {
    fn get_affectation(&self, id: usize) -> usize {
        self.labels[id]
    }

    fn get_nb_cluster(&self) -> usize {
        self.nb_cluster
    }

    fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..self.labels.len())
            .zip(self.labels.iter())
            .map(|it| (it.0, *(it.1)))
    }
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn unassigned_then_filled() {
        let empty = Assignment::unassigned(4, 2);
        assert_eq!(empty.len(), 4);
        assert_eq!(empty.get_cluster_sizes(), vec![0, 0]);
        assert_eq!(empty.get_affectation(2), UNASSIGNED);
        //
        let full = Assignment::new(vec![1, 0, 1, 1], 2);
        assert_eq!(full.get_cluster_sizes(), vec![1, 3]);
        assert_eq!(full.nb_changes(&empty), 4);
        assert_eq!(full.nb_changes(&full.clone()), 0);
        assert_eq!(full.get_nb_cluster(), 2);
    }

    #[test]
    fn affectation_iter() {
        let assignment = Assignment::new(vec![2, 0, UNASSIGNED], 3);
        let couples: Vec<(usize, usize)> = assignment.iter().collect();
        assert_eq!(couples, vec![(0, 2), (1, 0), (2, UNASSIGNED)]);
        assert_eq!(assignment.get_cluster_sizes(), vec![1, 0, 1]);
    }

    #[test]
    #[should_panic]
    fn label_out_of_range() {
        let _ = Assignment::new(vec![0, 3], 3);
    }
} // end of mod tests
