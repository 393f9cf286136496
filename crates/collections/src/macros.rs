macro_rules! boxnode {
    ( $key: expr, $value: expr) => {
        Box::new($crate::linked_list::Node {
            key: $key,
            value: $value,
            next: None,
        })
    };
}

#[cfg(test)]
macro_rules! node {
    ( $key: expr, $value: expr) => {
        $crate::linked_list::Node {
            key: $key.into(),
            value: $value.into(),
            next: None,
        }
    };
}

pub(crate) use boxnode;
#[cfg(test)]
pub(crate) use node;
