//! Resource endpoints: dashboard, students, teachers, classes, subjects
//! and payments.
//!
//! These are thin wrappers over `ApiClient::send_json`; credential
//! handling lives entirely in the gateway.

use crate::models::{
    BulkPaymentRequest, Class, ClassFilters, ClassFormData, ClassStatistics, DashboardStats,
    EnrollmentRequest, Envelope, PaginatedResponse, Payment, PaymentFilters, PaymentFormData,
    Student, StudentClassHistory, StudentFilters, StudentFormData, StudentPaymentHistory, Subject,
    SubjectFilters, SubjectFormData, Teacher, TeacherFilters, TeacherFormData, TeacherStatistics,
};

use super::{ApiClient, ApiError, ApiRequest};

impl ApiClient {
    // ===== Dashboard =====

    pub async fn dashboard_statistics(&self) -> Result<DashboardStats, ApiError> {
        let envelope: Envelope<DashboardStats> = self
            .send_json(ApiRequest::get("/dashboard/statistics"))
            .await?;
        Ok(envelope.data)
    }

    // ===== Students =====

    pub async fn list_students(
        &self,
        filters: &StudentFilters,
    ) -> Result<PaginatedResponse<Student>, ApiError> {
        self.send_json(ApiRequest::get("/students").query_params(filters)?)
            .await
    }

    pub async fn get_student(&self, id: &str) -> Result<Student, ApiError> {
        let envelope: Envelope<Student> = self
            .send_json(ApiRequest::get("/students").segment(id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_student(&self, data: &StudentFormData) -> Result<Student, ApiError> {
        let envelope: Envelope<Student> = self
            .send_json(ApiRequest::post("/students").json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_student(
        &self,
        id: &str,
        data: &StudentFormData,
    ) -> Result<Student, ApiError> {
        let envelope: Envelope<Student> = self
            .send_json(ApiRequest::put("/students").segment(id).json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete("/students").segment(id))
            .await
    }

    /// Payments made by a student, with paid/pending totals
    pub async fn student_payments(&self, id: &str) -> Result<StudentPaymentHistory, ApiError> {
        let envelope: Envelope<StudentPaymentHistory> = self
            .send_json(ApiRequest::get("/students").segment(id).segment("payments"))
            .await?;
        Ok(envelope.data)
    }

    /// Classes a student is or was enrolled in
    pub async fn student_classes(&self, id: &str) -> Result<StudentClassHistory, ApiError> {
        let envelope: Envelope<StudentClassHistory> = self
            .send_json(ApiRequest::get("/students").segment(id).segment("classes"))
            .await?;
        Ok(envelope.data)
    }

    // ===== Teachers =====

    pub async fn list_teachers(
        &self,
        filters: &TeacherFilters,
    ) -> Result<PaginatedResponse<Teacher>, ApiError> {
        self.send_json(ApiRequest::get("/teachers").query_params(filters)?)
            .await
    }

    pub async fn get_teacher(&self, id: &str) -> Result<Teacher, ApiError> {
        let envelope: Envelope<Teacher> = self
            .send_json(ApiRequest::get("/teachers").segment(id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_teacher(&self, data: &TeacherFormData) -> Result<Teacher, ApiError> {
        let envelope: Envelope<Teacher> = self
            .send_json(ApiRequest::post("/teachers").json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_teacher(
        &self,
        id: &str,
        data: &TeacherFormData,
    ) -> Result<Teacher, ApiError> {
        let envelope: Envelope<Teacher> = self
            .send_json(ApiRequest::put("/teachers").segment(id).json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete_teacher(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete("/teachers").segment(id))
            .await
    }

    pub async fn teacher_statistics(&self, id: &str) -> Result<TeacherStatistics, ApiError> {
        let envelope: Envelope<TeacherStatistics> = self
            .send_json(ApiRequest::get("/teachers").segment(id).segment("statistics"))
            .await?;
        Ok(envelope.data)
    }

    // ===== Classes =====

    pub async fn list_classes(
        &self,
        filters: &ClassFilters,
    ) -> Result<PaginatedResponse<Class>, ApiError> {
        self.send_json(ApiRequest::get("/classes").query_params(filters)?)
            .await
    }

    pub async fn get_class(&self, id: &str) -> Result<Class, ApiError> {
        let envelope: Envelope<Class> = self
            .send_json(ApiRequest::get("/classes").segment(id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_class(&self, data: &ClassFormData) -> Result<Class, ApiError> {
        let envelope: Envelope<Class> = self
            .send_json(ApiRequest::post("/classes").json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_class(&self, id: &str, data: &ClassFormData) -> Result<Class, ApiError> {
        let envelope: Envelope<Class> = self
            .send_json(ApiRequest::put("/classes").segment(id).json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete_class(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete("/classes").segment(id))
            .await
    }

    pub async fn enroll_student(&self, class_id: &str, student_id: &str) -> Result<(), ApiError> {
        let body = EnrollmentRequest {
            student_id: student_id.to_string(),
        };
        let request = ApiRequest::post("/classes")
            .segment(class_id)
            .segment("students")
            .json(&body)?;
        self.send_empty(request).await
    }

    /// The student id travels in the DELETE body, not the path.
    pub async fn unenroll_student(&self, class_id: &str, student_id: &str) -> Result<(), ApiError> {
        let body = EnrollmentRequest {
            student_id: student_id.to_string(),
        };
        let request = ApiRequest::delete("/classes")
            .segment(class_id)
            .segment("students")
            .json(&body)?;
        self.send_empty(request).await
    }

    pub async fn class_statistics(&self, id: &str) -> Result<ClassStatistics, ApiError> {
        let envelope: Envelope<ClassStatistics> = self
            .send_json(ApiRequest::get("/classes").segment(id).segment("statistics"))
            .await?;
        Ok(envelope.data)
    }

    // ===== Subjects =====

    pub async fn list_subjects(
        &self,
        filters: &SubjectFilters,
    ) -> Result<PaginatedResponse<Subject>, ApiError> {
        self.send_json(ApiRequest::get("/subjects").query_params(filters)?)
            .await
    }

    pub async fn get_subject(&self, id: &str) -> Result<Subject, ApiError> {
        let envelope: Envelope<Subject> = self
            .send_json(ApiRequest::get("/subjects").segment(id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_subject(&self, data: &SubjectFormData) -> Result<Subject, ApiError> {
        let envelope: Envelope<Subject> = self
            .send_json(ApiRequest::post("/subjects").json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_subject(
        &self,
        id: &str,
        data: &SubjectFormData,
    ) -> Result<Subject, ApiError> {
        let envelope: Envelope<Subject> = self
            .send_json(ApiRequest::put("/subjects").segment(id).json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete_subject(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete("/subjects").segment(id))
            .await
    }

    pub async fn subjects_by_grade(&self, grade: &str) -> Result<Vec<Subject>, ApiError> {
        let envelope: Envelope<Vec<Subject>> = self
            .send_json(ApiRequest::get("/subjects/grade").segment(grade))
            .await?;
        Ok(envelope.data)
    }

    // ===== Payments =====

    pub async fn list_payments(
        &self,
        filters: &PaymentFilters,
    ) -> Result<PaginatedResponse<Payment>, ApiError> {
        self.send_json(ApiRequest::get("/payments").query_params(filters)?)
            .await
    }

    pub async fn get_payment(&self, id: &str) -> Result<Payment, ApiError> {
        let envelope: Envelope<Payment> = self
            .send_json(ApiRequest::get("/payments").segment(id))
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_payment(&self, data: &PaymentFormData) -> Result<Payment, ApiError> {
        let envelope: Envelope<Payment> = self
            .send_json(ApiRequest::post("/payments").json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn create_payments_bulk(
        &self,
        payments: Vec<PaymentFormData>,
    ) -> Result<Vec<Payment>, ApiError> {
        let body = BulkPaymentRequest { payments };
        let envelope: Envelope<Vec<Payment>> = self
            .send_json(ApiRequest::post("/payments/bulk").json(&body)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn update_payment(
        &self,
        id: &str,
        data: &PaymentFormData,
    ) -> Result<Payment, ApiError> {
        let envelope: Envelope<Payment> = self
            .send_json(ApiRequest::put("/payments").segment(id).json(data)?)
            .await?;
        Ok(envelope.data)
    }

    pub async fn delete_payment(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(ApiRequest::delete("/payments").segment(id))
            .await
    }

    /// Same endpoint as `student_payments`, kept under the payments group
    pub async fn payments_by_student(
        &self,
        student_id: &str,
    ) -> Result<StudentPaymentHistory, ApiError> {
        self.student_payments(student_id).await
    }
}
