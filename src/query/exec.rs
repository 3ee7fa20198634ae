use super::builder::MenuQuery;
use super::token::{Sentence, Token};
use super::types::Criteria;
use crate::errors::Result;
use crate::item::FromRow;
use crate::logger::SENTENCE_TARGET;
use crate::transport::Transport;
use crate::types::{ID_FIELD, ItemId, Row};

pub(crate) const PRINT: &str = "/print";
pub(crate) const REMOVE: &str = "/remove";

impl<T: Transport> MenuQuery<T> {
    async fn send(&self, sentence: Sentence) -> Result<Vec<Row>> {
        let words = sentence.into_words();
        log::debug!(target: SENTENCE_TARGET, "{words:?}");
        match self.transport.write(words).await {
            Ok(rows) => {
                log::debug!("{}: {} row(s)", self.path(), rows.len());
                Ok(rows)
            }
            Err(e) => {
                log::warn!("{}: {e}", self.path());
                Err(e)
            }
        }
    }

    /// Print every row matching the chain.
    ///
    /// # Errors
    /// Propagates the transport's error unchanged.
    pub async fn get(self) -> Result<Vec<Row>> {
        let sentence = self.assemble(PRINT)?;
        self.send(sentence).await
    }

    /// [`get`](Self::get) with extra `?` conditions folded in first.
    ///
    /// # Errors
    /// Propagates the transport's error unchanged.
    pub async fn get_by(self, data: impl Into<Criteria>) -> Result<Vec<Row>> {
        self.where_(data).get().await
    }

    pub async fn get_all(self) -> Result<Vec<Row>> {
        self.get().await
    }

    pub async fn print(self) -> Result<Vec<Row>> {
        self.get().await
    }

    /// First matching row, or an empty row when nothing matched.
    ///
    /// # Errors
    /// Propagates the transport's error unchanged; zero rows is not an error.
    pub async fn find(self) -> Result<Row> {
        Ok(self.get().await?.into_iter().next().unwrap_or_default())
    }

    pub async fn find_by(self, data: impl Into<Criteria>) -> Result<Row> {
        self.where_(data).find().await
    }

    pub async fn first(self) -> Result<Row> {
        self.find().await
    }

    pub async fn get_one(self) -> Result<Row> {
        self.find().await
    }

    pub async fn get_only(self) -> Result<Row> {
        self.find().await
    }

    /// Every row wrapped with `C::from_row`, in reply order.
    ///
    /// # Errors
    /// Propagates the transport's error unchanged.
    pub async fn get_collection<C: FromRow>(self) -> Result<Vec<C>> {
        let case = self.case_mode();
        let rows = self.get().await?;
        Ok(rows.into_iter().map(|row| C::from_row(row, case)).collect())
    }

    pub async fn get_collection_by<C: FromRow>(self, data: impl Into<Criteria>) -> Result<Vec<C>> {
        self.where_(data).get_collection().await
    }

    /// Remove every item of the menu: print all ids, then remove them in one batch.
    ///
    /// The chain's projection and filters are not used. The remove is sent only
    /// after the print succeeded, even when it returned no ids. Returns the rows of
    /// the remove reply.
    ///
    /// # Errors
    /// Propagates the first transport error; a failed print means nothing is removed.
    pub async fn purge(self) -> Result<Vec<Row>> {
        let print = Sentence::new(vec![
            Token::Command(format!("{}{PRINT}", self.path())),
            Token::Proplist(vec![ID_FIELD.to_string()]),
        ]);
        let ids: Vec<ItemId> = self
            .send(print)
            .await?
            .into_iter()
            .filter_map(|mut row| row.remove(ID_FIELD))
            .collect();
        log::info!("purge {}: removing {} item(s)", self.path(), ids.len());
        let remove = Sentence::new(vec![
            Token::Command(format!("{}{REMOVE}", self.path())),
            Token::Numbers(ids),
        ]);
        self.send(remove).await
    }
}
